use super::*;

#[traced_test]
#[tokio::test]
async fn test_create_note_links_back() -> TestResult<()> {
  let (library, vault) = create_test_library();
  Import::new("Foo.pdf", foo_pdf(), &PdfAnalyzer::new()).execute(&library).await?;
  assert_eq!(library.resolve_note("Foo").await?, NoteLink::Create);

  let note = CreateNote::new("Foo").execute(&library).await?;

  assert!(note.created);
  assert_eq!(note.entry.path, "researcher-library/notes/Foo.md");
  let content = std::fs::read_to_string(vault.path().join("researcher-library/notes/Foo.md"))?;
  assert_eq!(
    content,
    "**PDF**: [[researcher-library/papers/Foo.pdf]]\n**Paper**: \
     [[researcher-library/papers/md/Foo.md]]\n**Author**: A\n**Publication Year**: \
     2020\n**Category**: N/A\n\n## Notes\n\n"
  );
  assert!(matches!(library.resolve_note("Foo").await?, NoteLink::Open(_)));
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_existing_note_is_reused() -> TestResult<()> {
  let (library, vault) = create_test_library();
  import_with(&library, "Foo.pdf", "T", "A").await?;
  let first = CreateNote::new("Foo").execute(&library).await?;
  let path = vault.path().join(&first.entry.path);
  std::fs::write(&path, "my own thoughts")?;

  let second = CreateNote::new("Foo").execute(&library).await?;

  assert!(!second.created);
  assert_eq!(second.entry.path, first.entry.path);
  assert_eq!(std::fs::read_to_string(&path)?, "my own thoughts");
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_note_defaults_when_metadata_missing() -> TestResult<()> {
  let (library, vault) = create_test_library();
  Import::new("Empty.pdf", create_test_pdf(&[]), &PdfAnalyzer::new()).execute(&library).await?;
  std::fs::remove_file(vault.path().join("researcher-library/papers/Empty.pdf"))?;

  let note = CreateNote::new("Empty").execute(&library).await?;

  let content = std::fs::read_to_string(vault.path().join(&note.entry.path))?;
  assert!(content.starts_with("**PDF**: \n"));
  assert!(content.contains("**Author**: N/A\n"));
  assert!(content.contains("**Publication Year**: N/A\n"));
  assert!(content.contains("**Category**: N/A\n"));
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_note_for_unknown_paper() -> TestResult<()> {
  let (library, vault) = create_test_library();

  let result = CreateNote::new("Ghost").execute(&library).await;

  assert!(matches!(result, Err(ShelfError::UnknownPaper(_))));
  assert!(files_under(vault.path()).is_empty());
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_concurrent_note_creation_yields_one_note() -> TestResult<()> {
  let (library, vault) = create_test_library();
  import_with(&library, "Foo.pdf", "T", "A").await?;

  let first = CreateNote::new("Foo");
  let second = CreateNote::new("Foo");
  let (a, b) = tokio::join!(first.execute(&library), second.execute(&library));
  let (a, b) = (a?, b?);

  assert_eq!(a.entry.path, b.entry.path);
  assert!(a.created ^ b.created);
  assert!(vault.path().join("researcher-library/notes/Foo.md").exists());
  Ok(())
}
