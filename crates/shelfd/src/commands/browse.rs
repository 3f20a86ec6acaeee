//! Module for the interactive catalog view.
//!
//! The view keeps a [`Session`] for as long as it is open. Every pass through the loop
//! re-reads the library and re-runs the catalog pipeline, so edits made elsewhere show up on
//! the next render. A failed action or catalog load is reported and the view stays open.

use super::*;

/// Actions offered below the paper rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewAction {
  /// Change the status filter
  FilterStatus,
  /// Change the search term
  Search,
  /// Change the sort order
  Sort,
  /// Leave the view
  Quit,
}

impl ViewAction {
  /// Menu order.
  const ALL: [ViewAction; 4] =
    [ViewAction::FilterStatus, ViewAction::Search, ViewAction::Sort, ViewAction::Quit];

  /// Menu label.
  fn label(&self) -> &'static str {
    match self {
      ViewAction::FilterStatus => "» Filter by status",
      ViewAction::Search => "» Search",
      ViewAction::Sort => "» Sort",
      ViewAction::Quit => "» Quit",
    }
  }
}

/// One-line summary of the view settings.
fn describe(session: &Session) -> String {
  format!(
    "Status: {} · Search: {} · Sort: {}",
    session.status_filter,
    if session.search.is_empty() { "-" } else { session.search.as_str() },
    session.sort
  )
}

/// Applies one of the view actions to the session. Returns `false` to leave the view.
fn apply_action<I: UserInteraction>(
  interaction: &I,
  session: &mut Session,
  action: ViewAction,
) -> Result<bool> {
  match action {
    ViewAction::FilterStatus => {
      let filters: Vec<StatusFilter> = std::iter::once(StatusFilter::All)
        .chain(Status::ALL.into_iter().map(StatusFilter::Only))
        .collect();
      let labels: Vec<String> = filters.iter().map(ToString::to_string).collect();
      let current = filters.iter().position(|f| *f == session.status_filter).unwrap_or(0);
      if let Some(choice) = interaction.select("Status", &labels, current)? {
        session.set_status_filter(filters[choice]);
      }
    },
    ViewAction::Search => {
      let search = interaction.prompt("Search", &session.search)?;
      session.set_search(search.trim());
    },
    ViewAction::Sort => {
      let labels: Vec<String> = SortOrder::ALL.iter().map(ToString::to_string).collect();
      let current = SortOrder::ALL.iter().position(|s| *s == session.sort).unwrap_or(0);
      if let Some(choice) = interaction.select("Sort by", &labels, current)? {
        session.set_sort(SortOrder::ALL[choice]);
      }
    },
    ViewAction::Quit => return Ok(false),
  }
  Ok(true)
}

/// Shows one paper and runs the action picked for it.
async fn paper_menu<I: UserInteraction>(
  interaction: &I,
  library: &Library<LocalStore>,
  paper: &Descriptor,
) -> Result<()> {
  interaction.reply(ResponseContent::Paper(paper))?;

  let note = library.resolve_note(&paper.basename).await?;
  let note_label = match note {
    NoteLink::Open(_) => "Open note",
    NoteLink::Create => "Create note",
  };
  let actions = ["Edit metadata", "Open PDF", note_label, "Remove", "Back"];
  let items: Vec<String> = actions.iter().map(ToString::to_string).collect();

  match interaction.select(&paper.display_title(), &items, 0)? {
    Some(0) => {
      let mut editor = MetadataEditor::open(library, &paper.basename).await?;
      edit_interactively(interaction, &mut editor)?;
      editor.save(library).await?;
      interaction.reply(ResponseContent::Success("Metadata saved"))?;
    },
    Some(1) => match library.blob(&paper.basename).await? {
      Some(blob) => open_in_vault(library, &blob.path)?,
      None => interaction.reply(ResponseContent::Info("This paper has no PDF"))?,
    },
    Some(2) => {
      let path = match note {
        NoteLink::Open(entry) => entry.path,
        NoteLink::Create => {
          let created = CreateNote::new(&paper.basename).execute(library).await?;
          interaction
            .reply(ResponseContent::Success(&format!("Created note {}", created.entry.path)))?;
          created.entry.path
        },
      };
      open_in_vault(library, &path)?;
    },
    Some(3) => {
      confirm_and_remove(interaction, library, &paper.basename).await?;
    },
    _ => {},
  }
  Ok(())
}

/// Function for the [`Commands::Browse`] in the CLI.
pub async fn browse<I: UserInteraction>(
  interaction: &I,
  library: &Library<LocalStore>,
) -> Result<()> {
  let mut session = Session::new();

  loop {
    interaction.reply(ResponseContent::Info(&describe(&session)))?;
    let papers = match Catalog::from_session(&session).execute(library).await {
      Ok(papers) => papers,
      Err(e) => {
        interaction.reply(ResponseContent::Error(e.into()))?;
        Vec::new()
      },
    };
    if papers.is_empty() {
      interaction.reply(ResponseContent::Info("No papers found"))?;
    } else {
      interaction.reply(ResponseContent::Papers(&papers))?;
    }

    let mut items: Vec<String> = papers
      .iter()
      .map(|paper| format!("{} [{}]", paper.display_title(), paper.display_status()))
      .collect();
    items.extend(ViewAction::ALL.iter().map(|action| action.label().to_string()));

    let Some(choice) = interaction.select("Choose a paper or an action", &items, 0)? else {
      return Ok(());
    };

    let outcome = match choice.checked_sub(papers.len()) {
      None => paper_menu(interaction, library, &papers[choice]).await,
      Some(action) => match apply_action(interaction, &mut session, ViewAction::ALL[action]) {
        Ok(false) => return Ok(()),
        other => other.map(|_| ()),
      },
    };
    if let Err(e) = outcome {
      interaction.reply(ResponseContent::Error(e))?;
    }
  }
}
