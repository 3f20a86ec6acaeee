use super::*;

/// Three papers with different statuses and searchable fields.
async fn populated_library() -> TestResult<(Library<LocalStore>, TempDir)> {
  let (library, vault) = create_test_library();
  import_with(&library, "Attention.pdf", "Attention Is All You Need", "Vaswani").await?;
  import_with(&library, "Bert.pdf", "BERT", "Devlin").await?;
  import_with(&library, "Gpt.pdf", "Language Models are Few-Shot Learners", "Brown").await?;

  Update::new("Bert")
    .with_title("BERT")
    .with_author("Devlin")
    .with_status(Status::Reading)
    .with_category("NLP")
    .execute(&library)
    .await?;
  Update::new("Gpt")
    .with_title("Language Models are Few-Shot Learners")
    .with_author("Brown")
    .with_status(Status::Finished)
    .with_category("nlp scaling")
    .execute(&library)
    .await?;
  Ok((library, vault))
}

fn basenames(descriptors: &[Descriptor]) -> Vec<&str> {
  let mut names: Vec<&str> = descriptors.iter().map(|d| d.basename.as_str()).collect();
  names.sort();
  names
}

#[traced_test]
#[tokio::test]
async fn test_catalog_lists_everything_by_default() -> TestResult<()> {
  let (library, _vault) = populated_library().await?;

  let all = Catalog::new().execute(&library).await?;
  assert_eq!(basenames(&all), vec!["Attention", "Bert", "Gpt"]);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_catalog_status_filter() -> TestResult<()> {
  let (library, _vault) = populated_library().await?;

  for status in Status::ALL {
    let visible =
      Catalog::new().with_status(StatusFilter::Only(status)).execute(&library).await?;
    assert!(visible.iter().all(|d| d.fields.status.as_deref() == Some(status.as_str())));
  }
  let reading =
    Catalog::new().with_status(StatusFilter::Only(Status::Reading)).execute(&library).await?;
  assert_eq!(basenames(&reading), vec!["Bert"]);
  let rereads =
    Catalog::new().with_status(StatusFilter::Only(Status::ReRead)).execute(&library).await?;
  assert!(rereads.is_empty());
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_catalog_search_is_case_insensitive() -> TestResult<()> {
  let (library, _vault) = populated_library().await?;

  let nlp = Catalog::new().with_search("NLP").execute(&library).await?;
  assert_eq!(basenames(&nlp), vec!["Bert", "Gpt"]);

  let by_author = Catalog::new().with_search("vasWANI").execute(&library).await?;
  assert_eq!(basenames(&by_author), vec!["Attention"]);

  let combined = Catalog::new()
    .with_status(StatusFilter::Only(Status::Finished))
    .with_search("nlp")
    .execute(&library)
    .await?;
  assert_eq!(basenames(&combined), vec!["Gpt"]);

  assert!(Catalog::new().with_search("quantum").execute(&library).await?.is_empty());
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_catalog_sorts_by_update_time() -> TestResult<()> {
  let (library, _vault) = create_test_library();
  for name in ["A.pdf", "B.pdf", "C.pdf"] {
    import_with(&library, name, "T", "A").await?;
  }
  std::thread::sleep(std::time::Duration::from_millis(50));
  Update::new("A").with_title("touched").execute(&library).await?;

  let newest_first =
    Catalog::new().with_sort(SortOrder::UpdatedDateDesc).execute(&library).await?;
  assert_eq!(newest_first[0].basename, "A");

  let oldest_first = Catalog::new().with_sort(SortOrder::UpdatedDateAsc).execute(&library).await?;
  assert_eq!(oldest_first.last().map(|d| d.basename.as_str()), Some("A"));
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_session_settings_change_the_view() -> TestResult<()> {
  let (library, _vault) = populated_library().await?;
  let mut session = shelf::catalog::Session::new();

  assert_eq!(Catalog::from_session(&session).execute(&library).await?.len(), 3);

  session.set_status_filter(StatusFilter::Only(Status::Reading));
  assert_eq!(basenames(&Catalog::from_session(&session).execute(&library).await?), vec!["Bert"]);

  session.set_status_filter(StatusFilter::All);
  session.set_search("brown");
  assert_eq!(basenames(&Catalog::from_session(&session).execute(&library).await?), vec!["Gpt"]);

  session.set_search("");
  session.set_sort(SortOrder::ImportDateDesc);
  assert_eq!(Catalog::from_session(&session).execute(&library).await?.len(), 3);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_catalog_skips_broken_descriptors() -> TestResult<()> {
  let (library, vault) = populated_library().await?;
  let md = vault.path().join("researcher-library/papers/md");
  std::fs::write(md.join("Broken.md"), "---\ntitle: [unclosed\n---\n")?;
  std::fs::write(md.join("notes.txt"), "not a descriptor")?;

  let all = Catalog::new().execute(&library).await?;
  assert_eq!(basenames(&all), vec!["Attention", "Bert", "Gpt"]);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_catalog_skips_descriptors_that_are_not_text() -> TestResult<()> {
  let (library, vault) = populated_library().await?;
  let md = vault.path().join("researcher-library/papers/md");
  std::fs::write(md.join("Bin.md"), [0xff, 0xfe, 0x00, 0x80])?;

  let all = Catalog::new().execute(&library).await?;
  assert_eq!(basenames(&all), vec!["Attention", "Bert", "Gpt"]);

  let reading =
    Catalog::new().with_status(StatusFilter::Only(Status::Reading)).execute(&library).await?;
  assert_eq!(basenames(&reading), vec!["Bert"]);
  Ok(())
}
