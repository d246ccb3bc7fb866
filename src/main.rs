//! CLI shell for the curio gallery.
//!
//! A small line-oriented frontend: reads commands from stdin, translates them
//! into [`UserAction`]s, and renders the resulting gallery page to stdout.
//! All engine behavior lives in the library; this binary only parses input
//! and formats output.

use curio::app::{handle_action, GallerySession, Outcome, UserAction};
use curio::catalog::HttpCatalog;
use curio::domain::{CurioError, ItemRecord};
use curio::store::ItemState;
use curio::storage::JsonStore;
use curio::view::GalleryStatus;
use curio::{infrastructure, observability, Config};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

type Session = GallerySession<HttpCatalog, JsonStore>;

#[tokio::main]
async fn main() {
    let config = match Config::load(&infrastructure::config_file()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("curio: {err}");
            std::process::exit(1);
        }
    };
    observability::init_tracing(&config);

    let data_dir = config
        .data_dir
        .as_ref()
        .map_or_else(infrastructure::data_dir, PathBuf::from);
    let storage = match JsonStore::new(infrastructure::collections_file(&data_dir)) {
        Ok(storage) => storage,
        Err(err) => {
            eprintln!("curio: cannot open collections storage: {err}");
            std::process::exit(1);
        }
    };

    let catalog = config
        .api_base_url
        .as_deref()
        .map_or_else(HttpCatalog::default, HttpCatalog::new);

    let mut session = Session::new(catalog, storage, config.page_size);

    println!("curio: explore the Met collection. Type 'help' for commands.");
    if let Err(err) = repl(&mut session).await {
        eprintln!("curio: {err}");
        std::process::exit(1);
    }
}

/// Reads commands until EOF or `quit`.
async fn repl(session: &mut Session) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let action = match parse_command(&line) {
            Command::Action(action) => action,
            Command::Show => {
                render_gallery(session);
                continue;
            }
            Command::ListCollections => {
                render_collections(session);
                continue;
            }
            Command::Delete(name) => {
                stdout
                    .write_all(format!("delete collection {name:?}? [y/N] ").as_bytes())
                    .await?;
                stdout.flush().await?;
                match lines.next_line().await? {
                    Some(answer) if answer.trim().eq_ignore_ascii_case("y") => {
                        UserAction::DestroyCollection(name)
                    }
                    _ => {
                        println!("kept {name:?}");
                        continue;
                    }
                }
            }
            Command::Help => {
                print_help();
                continue;
            }
            Command::Quit => break,
            Command::Empty => continue,
            Command::Unknown(input) => {
                println!("unknown command {input:?}; type 'help'");
                continue;
            }
        };

        match handle_action(session, action).await {
            Ok(Outcome::Refreshed) => render_gallery(session),
            Ok(Outcome::ItemOpened(id)) => render_item(session, id),
            Ok(Outcome::Feedback(line)) => println!("{line}"),
            Err(err @ (CurioError::DuplicateName(_) | CurioError::CollectionNotFound(_))) => {
                println!("{err}");
            }
            Err(err) => println!("error: {err}"),
        }
    }
    Ok(())
}

enum Command {
    Action(UserAction),
    Show,
    ListCollections,
    Delete(String),
    Help,
    Quit,
    Empty,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(v, r)| (v, r.trim()));

    match (verb, rest) {
        ("help" | "?", _) => Command::Help,
        ("quit" | "exit" | "q", _) => Command::Quit,
        ("show", _) => Command::Show,
        ("collections" | "ls", _) => Command::ListCollections,
        ("search" | "s", term) => Command::Action(UserAction::Search(term.to_string())),
        ("page" | "p", arg) => match arg.parse() {
            Ok(page) => Command::Action(UserAction::GoToPage(page)),
            Err(_) => Command::Unknown(line.to_string()),
        },
        ("next" | "n", _) => Command::Action(UserAction::NextPage),
        ("prev" | "b", _) => Command::Action(UserAction::PrevPage),
        ("open" | "o", arg) => match arg.parse() {
            Ok(id) => Command::Action(UserAction::OpenItem(id)),
            Err(_) => Command::Unknown(line.to_string()),
        },
        ("new", name) if !name.is_empty() => {
            Command::Action(UserAction::CreateCollection(name.to_string()))
        }
        ("view", name) if !name.is_empty() => {
            Command::Action(UserAction::OpenCollection(name.to_string()))
        }
        ("back", _) => Command::Action(UserAction::ExitCollection),
        ("add", args) => parse_membership(args, line, |name, id| UserAction::AddToCollection {
            name,
            id,
        }),
        ("remove" | "rm", args) => {
            parse_membership(args, line, |name, id| UserAction::RemoveFromCollection {
                name,
                id,
            })
        }
        ("rename", args) => match args.split_once(char::is_whitespace) {
            Some((from, to)) if !to.trim().is_empty() => {
                Command::Action(UserAction::RenameCollection {
                    from: from.to_string(),
                    to: to.trim().to_string(),
                })
            }
            _ => Command::Unknown(line.to_string()),
        },
        ("delete" | "del", name) if !name.is_empty() => Command::Delete(name.to_string()),
        _ => Command::Unknown(line.to_string()),
    }
}

/// Parses `<name> <id>` where the ID is the final token, so collection names
/// may contain spaces.
fn parse_membership(
    args: &str,
    line: &str,
    build: impl FnOnce(String, u64) -> UserAction,
) -> Command {
    let Some((name, id)) = args.rsplit_once(char::is_whitespace) else {
        return Command::Unknown(line.to_string());
    };
    match id.parse() {
        Ok(id) if !name.trim().is_empty() => Command::Action(build(name.trim().to_string(), id)),
        _ => Command::Unknown(line.to_string()),
    }
}

fn render_gallery(session: &Session) {
    let descriptor = session.descriptor();
    let view = session.current_view();

    match view.status {
        GalleryStatus::Idle => {
            println!("(no search yet; try: search sunflowers)");
            return;
        }
        GalleryStatus::NoResults => {
            if session.search_failed() {
                println!("search for {:?} failed; NO RESULTS", descriptor.search_term);
            } else {
                println!("NO RESULTS for {:?}", descriptor.search_term);
            }
            return;
        }
        GalleryStatus::Ready => {}
    }

    match descriptor.mode {
        curio::ViewMode::Search => println!(
            "results for {:?}, page {}/{} ({} items)",
            descriptor.search_term, view.page, view.page_count, view.total
        ),
        curio::ViewMode::Collection => println!(
            "collection {:?}, page {}/{} ({} items)",
            descriptor.collection_name, view.page, view.page_count, view.total
        ),
    }

    for id in &view.page_items {
        match session.item_state(*id) {
            Some(ItemState::Hydrated(record)) => println!("  {}", item_line(record)),
            Some(ItemState::Rejected(reason)) => println!("  {id:>8}  (unavailable: {reason})"),
            Some(ItemState::Loading) | None => println!("  {id:>8}  …"),
        }
    }
}

fn render_item(session: &Session, id: u64) {
    match session.item_state(id) {
        Some(ItemState::Hydrated(record)) => render_record(record),
        Some(ItemState::Rejected(reason)) => println!("object {id} is unavailable: {reason}"),
        Some(ItemState::Loading) | None => println!("object {id} is still loading"),
    }
}

fn render_record(record: &ItemRecord) {
    println!("{} (object {})", record.display_title(), record.id);
    let subtitle = record.display_subtitle();
    if !subtitle.is_empty() {
        println!("  {subtitle}");
    }
    if let Some(date) = &record.object_date {
        println!("  date: {date}");
    }
    if let Some(classification) = &record.classification {
        println!("  classification: {classification}");
    }
    if let Some(dimensions) = &record.dimensions {
        println!("  dimensions: {dimensions}");
    }
    if let Some(department) = record.department {
        println!("  department: {}", department.name());
    }
    if let Some(credit) = &record.credit_line {
        println!("  credit: {credit}");
    }
    if !record.tags.is_empty() {
        println!("  tags: {}", record.tags.join(", "));
    }
    println!("  image: {}", record.primary_image);
}

fn item_line(record: &ItemRecord) -> String {
    let subtitle = record.display_subtitle();
    if subtitle.is_empty() {
        format!("{:>8}  {}", record.id, record.display_title())
    } else {
        format!("{:>8}  {} - {}", record.id, record.display_title(), subtitle)
    }
}

fn render_collections(session: &Session) {
    let collections = session.collections();
    if collections.is_empty() {
        println!("(no collections; try: new favorites)");
        return;
    }
    for (name, count) in collections.summaries() {
        println!("  {name}  ({count} items)");
    }
}

fn print_help() {
    println!(
        "\
commands:
  search <term>        search the collection
  page <n> | next | prev
  show                 re-render the current page
  open <id>            show an item's details
  collections          list your collections
  new <name>           create a collection
  view <name>          browse a collection
  back                 return to search results
  add <name> <id>      add an item to a collection
  remove <name> <id>   remove an item from a collection
  rename <old> <new>   rename a collection
  delete <name>        destroy a collection (asks first)
  quit"
    );
}
