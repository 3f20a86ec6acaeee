use super::*;

#[traced_test]
#[tokio::test]
async fn test_import_writes_blob_and_descriptor() -> TestResult<()> {
  let (library, vault) = create_test_library();
  let bytes = foo_pdf();

  let descriptor =
    Import::new("Foo.pdf", bytes.clone(), &PdfAnalyzer::new()).execute(&library).await?;

  assert_eq!(descriptor.basename, "Foo");
  assert_eq!(descriptor.path, "researcher-library/papers/md/Foo.md");
  assert_eq!(descriptor.fields.title.as_deref(), Some("T"));
  assert_eq!(descriptor.fields.author.as_deref(), Some("A"));
  assert_eq!(descriptor.fields.publication_year.as_deref(), Some("2020"));
  assert_eq!(descriptor.fields.status.as_deref(), Some("to-read"));
  assert_eq!(descriptor.fields.category.as_deref(), Some(""));

  assert_eq!(std::fs::read(vault.path().join("researcher-library/papers/Foo.pdf"))?, bytes);
  let content =
    std::fs::read_to_string(vault.path().join("researcher-library/papers/md/Foo.md"))?;
  assert!(content.starts_with("---\ntitle: \"T\"\n"));
  assert!(content.contains("\n# [[Foo.pdf]]\n"));

  assert_eq!(files_under(vault.path()), vec![
    "researcher-library/papers/Foo.pdf",
    "researcher-library/papers/md/Foo.md",
  ]);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_import_without_metadata() -> TestResult<()> {
  let (library, _vault) = create_test_library();

  let descriptor =
    Import::new("bare.PDF", create_test_pdf(&[]), &PdfAnalyzer::new()).execute(&library).await?;

  assert_eq!(descriptor.basename, "bare");
  assert_eq!(descriptor.fields.title.as_deref(), Some(""));
  assert_eq!(descriptor.display_title(), "bare.pdf");
  assert_eq!(descriptor.display_status(), "to-read");
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_import_unreadable_pdf_writes_nothing() -> TestResult<()> {
  let (library, vault) = create_test_library();

  let result =
    Import::new("Broken.pdf", b"not a pdf at all".to_vec(), &PdfAnalyzer::new()).execute(&library).await;

  assert!(matches!(result, Err(ShelfError::Lopdf(_))));
  assert!(files_under(vault.path()).is_empty());
  assert!(!vault.path().join(LIBRARY).exists());
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_duplicate_import_is_refused() -> TestResult<()> {
  let (library, vault) = create_test_library();
  import_with(&library, "Foo.pdf", "First", "A").await?;
  let before = std::fs::read_to_string(vault.path().join("researcher-library/papers/md/Foo.md"))?;

  let result = import_with(&library, "Foo.pdf", "Second", "B").await;

  assert!(result.is_err());
  let after = std::fs::read_to_string(vault.path().join("researcher-library/papers/md/Foo.md"))?;
  assert_eq!(before, after);
  assert_eq!(Catalog::new().execute(&library).await?.len(), 1);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_import_keeps_existing_blob() -> TestResult<()> {
  let (library, vault) = create_test_library();
  let papers = vault.path().join("researcher-library/papers");
  std::fs::create_dir_all(&papers)?;
  std::fs::write(papers.join("Foo.pdf"), b"already here")?;

  let descriptor = import_with(&library, "Foo.pdf", "T", "A").await?;

  assert_eq!(descriptor.basename, "Foo");
  assert_eq!(std::fs::read(papers.join("Foo.pdf"))?, b"already here".to_vec());
  assert!(papers.join("md/Foo.md").exists());
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_import_rejects_empty_names() -> TestResult<()> {
  let (library, vault) = create_test_library();

  for name in [".pdf", "", "dir/.pdf"] {
    let result = import_with(&library, name, "T", "A").await;
    assert!(matches!(result, Err(ShelfError::InvalidName(_))), "{name:?} was accepted");
  }
  assert!(files_under(vault.path()).is_empty());
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_concurrent_imports_of_distinct_papers() -> TestResult<()> {
  let (library, _vault) = create_test_library();
  let extractor = metadata("T", "A");

  let import_a = Import::new("A.pdf", b"a".to_vec(), &extractor);
  let import_b = Import::new("B.pdf", b"b".to_vec(), &extractor);
  let (a, b) = tokio::join!(import_a.execute(&library), import_b.execute(&library));
  a?;
  b?;

  assert_eq!(Catalog::new().execute(&library).await?.len(), 2);
  Ok(())
}
