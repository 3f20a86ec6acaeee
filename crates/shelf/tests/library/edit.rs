use super::*;

#[traced_test]
#[tokio::test]
async fn test_editing_status_changes_only_status() -> TestResult<()> {
  let (library, vault) = create_test_library();
  Import::new("Foo.pdf", foo_pdf(), &PdfAnalyzer::new()).execute(&library).await?;
  let path = vault.path().join("researcher-library/papers/md/Foo.md");
  let before = std::fs::read_to_string(&path)?;

  let mut editor = MetadataEditor::open(&library, "Foo").await?;
  assert_eq!(editor.title(), "T");
  assert_eq!(editor.status(), Status::ToRead);
  editor.set_status(Status::Finished);
  let descriptor = editor.save(&library).await?;

  assert_eq!(descriptor.fields.status.as_deref(), Some("finished"));
  assert_eq!(descriptor.fields.title.as_deref(), Some("T"));
  assert_eq!(descriptor.fields.author.as_deref(), Some("A"));
  assert_eq!(descriptor.fields.publication_year.as_deref(), Some("2020"));
  assert_eq!(descriptor.fields.category.as_deref(), Some(""));

  let after = std::fs::read_to_string(&path)?;
  let body = |doc: &str| doc.splitn(3, "---\n").nth(2).map(str::to_string);
  assert_eq!(body(&before), body(&after));
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_unsaved_edits_are_discarded() -> TestResult<()> {
  let (library, _vault) = create_test_library();
  import_with(&library, "Foo.pdf", "T", "A").await?;

  let mut editor = MetadataEditor::open(&library, "Foo").await?;
  editor.set_title("Changed");
  editor.set_category("ml");
  drop(editor);

  let descriptor = library.descriptor("Foo").await?;
  assert_eq!(descriptor.fields.title.as_deref(), Some("T"));
  assert_eq!(descriptor.fields.category.as_deref(), Some(""));
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_update_keeps_extra_keys() -> TestResult<()> {
  let (library, vault) = create_test_library();
  let md = vault.path().join("researcher-library/papers/md");
  std::fs::create_dir_all(&md)?;
  std::fs::write(
    md.join("Hand.md"),
    "---\ntitle: Old\ntags:\n  - x\nstatus: weird\n---\nHand written body\n",
  )?;

  let editor = MetadataEditor::open(&library, "Hand").await?;
  assert_eq!(editor.status(), Status::ToRead);

  Update::from(&editor).with_title("New").with_category("c").execute(&library).await?;

  let content = std::fs::read_to_string(md.join("Hand.md"))?;
  assert!(content.ends_with("---\nHand written body\n"));
  assert!(content.contains("tags:"));
  let descriptor = library.descriptor("Hand").await?;
  assert_eq!(descriptor.fields.title.as_deref(), Some("New"));
  assert_eq!(descriptor.fields.status.as_deref(), Some("to-read"));
  assert_eq!(descriptor.fields.category.as_deref(), Some("c"));
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_update_unknown_paper() -> TestResult<()> {
  let (library, vault) = create_test_library();

  let result = Update::new("Ghost").with_title("x").execute(&library).await;
  assert!(matches!(result, Err(ShelfError::UnknownPaper(_))));
  assert!(matches!(
    MetadataEditor::open(&library, "Ghost").await,
    Err(ShelfError::UnknownPaper(_))
  ));
  assert!(files_under(vault.path()).is_empty());
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_editor_remove_needs_confirmation() -> TestResult<()> {
  let (library, _vault) = create_test_library();
  import_with(&library, "Foo.pdf", "T", "A").await?;
  let editor = MetadataEditor::open(&library, "Foo").await?;

  let mut asked = String::new();
  let declined = editor
    .remove(&library, |question| {
      asked = question.to_string();
      Ok(false)
    })
    .await?;
  assert!(declined.is_none());
  assert_eq!(asked, REMOVE_CONFIRMATION);
  assert!(library.descriptor("Foo").await.is_ok());

  let removal = editor.remove(&library, |_| Ok(true)).await?.expect("confirmed removal");
  assert_eq!(removal.basename, "Foo");
  assert!(matches!(library.descriptor("Foo").await, Err(ShelfError::UnknownPaper(_))));
  Ok(())
}
