use super::*;

#[traced_test]
#[tokio::test]
async fn test_remove_without_note_deletes_descriptor_and_blob() -> TestResult<()> {
  let (library, vault) = create_test_library();
  let library = library.with_trash(false);
  import_with(&library, "Foo.pdf", "T", "A").await?;
  import_with(&library, "Bar.pdf", "T", "A").await?;

  let removal = Remove::new("Foo").execute(&library).await?;

  assert_eq!(removal.descriptor, "researcher-library/papers/md/Foo.md");
  assert_eq!(removal.blob.as_deref(), Some("researcher-library/papers/Foo.pdf"));
  assert_eq!(removal.note, None);
  assert!(removal.failures.is_empty());
  assert_eq!(files_under(vault.path()), vec![
    "researcher-library/papers/Bar.pdf",
    "researcher-library/papers/md/Bar.md",
  ]);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_remove_cascades_to_note_via_trash() -> TestResult<()> {
  let (library, vault) = create_test_library();
  import_with(&library, "Foo.pdf", "T", "A").await?;
  CreateNote::new("Foo").execute(&library).await?;

  let removal = Remove::new("Foo").execute(&library).await?;

  assert_eq!(removal.paths().len(), 3);
  assert_eq!(files_under(vault.path()), vec![
    ".trash/researcher-library/notes/Foo.md",
    ".trash/researcher-library/papers/Foo.pdf",
    ".trash/researcher-library/papers/md/Foo.md",
  ]);
  assert!(Catalog::new().execute(&library).await?.is_empty());
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_dry_run_removes_nothing() -> TestResult<()> {
  let (library, vault) = create_test_library();
  import_with(&library, "Foo.pdf", "T", "A").await?;
  CreateNote::new("Foo").execute(&library).await?;
  let before = files_under(vault.path());

  let preview = Remove::new("Foo").dry_run().execute(&library).await?;

  assert!(preview.dry_run);
  assert_eq!(preview.paths(), vec![
    "researcher-library/papers/md/Foo.md",
    "researcher-library/papers/Foo.pdf",
    "researcher-library/notes/Foo.md",
  ]);
  assert_eq!(files_under(vault.path()), before);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_remove_with_missing_blob() -> TestResult<()> {
  let (library, vault) = create_test_library();
  let library = library.with_trash(false);
  import_with(&library, "Foo.pdf", "T", "A").await?;
  std::fs::remove_file(vault.path().join("researcher-library/papers/Foo.pdf"))?;

  let removal = Remove::new("Foo").execute(&library).await?;

  assert_eq!(removal.blob, None);
  assert!(removal.failures.is_empty());
  assert!(files_under(vault.path()).is_empty());
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_remove_unknown_paper_touches_nothing() -> TestResult<()> {
  let (library, vault) = create_test_library();
  let papers = vault.path().join("researcher-library/papers");
  std::fs::create_dir_all(&papers)?;
  std::fs::write(papers.join("Orphan.pdf"), b"%PDF")?;

  let result = Remove::new("Orphan").execute(&library).await;

  assert!(matches!(result, Err(ShelfError::UnknownPaper(_))));
  assert!(papers.join("Orphan.pdf").exists());
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_confirmed_remove_of_descriptor_with_broken_frontmatter() -> TestResult<()> {
  let (library, vault) = create_test_library();
  let library = library.with_trash(false);
  import_with(&library, "Broken.pdf", "T", "A").await?;
  CreateNote::new("Broken").execute(&library).await?;
  let descriptor = vault.path().join("researcher-library/papers/md/Broken.md");
  std::fs::write(&descriptor, "---\ntitle: [unclosed\n---\n")?;
  assert!(matches!(MetadataEditor::open(&library, "Broken").await, Err(ShelfError::Yaml(_))));

  let declined =
    Remove::new("Broken").execute_confirmed(&library, |_| Ok::<_, ShelfError>(false)).await?;
  assert!(declined.is_none());
  assert!(descriptor.exists());

  let removal = Remove::new("Broken")
    .execute_confirmed(&library, |question| {
      assert_eq!(question, REMOVE_CONFIRMATION);
      Ok::<_, ShelfError>(true)
    })
    .await?
    .expect("confirmed removal");

  assert_eq!(removal.paths().len(), 3);
  assert!(files_under(vault.path()).is_empty());
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_confirmed_remove_of_unknown_paper_does_not_ask() -> TestResult<()> {
  let (library, _vault) = create_test_library();

  let result = Remove::new("Ghost")
    .execute_confirmed(&library, |_| -> Result<bool, ShelfError> {
      panic!("asked about a paper that does not exist")
    })
    .await;

  assert!(matches!(result, Err(ShelfError::UnknownPaper(_))));
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_save_and_remove_of_one_paper_do_not_interleave() -> TestResult<()> {
  let (library, vault) = create_test_library();
  let full_update = |basename: &str| {
    Update::new(basename)
      .with_title("New Title")
      .with_author("B")
      .with_status(Status::Finished)
      .with_category("c")
  };

  for (basename, update_first) in [("Foo", true), ("Bar", false)] {
    import_with(&library, &format!("{basename}.pdf"), "Old Title", "A").await?;
    let update = full_update(basename);
    let remove = Remove::new(basename);

    let (updated, removed) = if update_first {
      tokio::join!(update.execute(&library), remove.execute(&library))
    } else {
      let (removed, updated) = tokio::join!(remove.execute(&library), update.execute(&library));
      (updated, removed)
    };
    removed?;

    let trashed = std::fs::read_to_string(
      vault.path().join(format!(".trash/researcher-library/papers/md/{basename}.md")),
    )?;
    match updated {
      Ok(descriptor) => {
        assert_eq!(descriptor.fields.title.as_deref(), Some("New Title"));
        assert!(trashed.contains("New Title"));
        assert!(trashed.contains("finished"));
        assert!(!trashed.contains("Old Title"));
      },
      Err(ShelfError::UnknownPaper(_)) => {
        assert!(trashed.contains("Old Title"));
        assert!(!trashed.contains("New Title"));
      },
      Err(e) => panic!("unexpected error {e}"),
    }
    assert!(library.descriptor(basename).await.is_err());
  }

  assert!(Catalog::new().execute(&library).await?.is_empty());
  assert!(files_under(vault.path()).iter().all(|path| path.starts_with(".trash/")));
  Ok(())
}
