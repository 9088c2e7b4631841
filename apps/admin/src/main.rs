use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    str::FromStr,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::load_settings,
    forms::new_reaction_field_name,
    AdminClient, FormFields, MoveDirection, Navigator, Notifier, OrderableItem, OrderedList,
    Page, ReorderController, SlideTypeDialog,
};
use shared::domain::{CollectionKind, LessonId, ReactionId, ReactionKind, SlideId, SlideType};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lesson-admin", about = "Manage lessons, slides and reactions")]
struct Cli {
    /// Overrides the server url from settings.
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
    /// Answer yes to every confirmation.
    #[arg(long, short = 'y')]
    yes: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Reorder lessons and save the new order.
    ReorderLessons {
        /// Current display order.
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<i64>,
        /// ID:up, ID:down or ID:POSITION, applied in order.
        #[arg(long = "move", value_name = "MOVE")]
        moves: Vec<MoveSpec>,
    },
    /// Reorder the slides of one lesson and save the chain.
    ReorderSlides {
        #[arg(long)]
        lesson_id: i64,
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<i64>,
        #[arg(long = "move", value_name = "MOVE")]
        moves: Vec<MoveSpec>,
    },
    AddLesson {
        /// Lesson the new one follows.
        after: i64,
    },
    AddSlide {
        lesson_id: i64,
        #[arg(long)]
        slide_type: SlideType,
        /// Slide the new one is inserted after.
        #[arg(long)]
        after: Option<i64>,
    },
    SaveSlide {
        slide_id: i64,
        #[arg(long = "field", value_name = "KEY=VALUE", value_parser = parse_field)]
        fields: Vec<(String, String)>,
        #[arg(long)]
        picture: Option<PathBuf>,
    },
    SaveLesson {
        lesson_id: i64,
        #[arg(long = "field", value_name = "KEY=VALUE", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
    SaveTexts {
        #[arg(long = "field", value_name = "PROMPT=TEXT", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
    SaveReactions {
        #[arg(long = "field", value_name = "KEY=VALUE", value_parser = parse_field)]
        fields: Vec<(String, String)>,
        #[arg(long)]
        add_correct: Vec<String>,
        #[arg(long)]
        add_incorrect: Vec<String>,
    },
    DeleteLesson {
        lesson_id: i64,
    },
    DeleteSlide {
        slide_id: i64,
    },
    DeleteReaction {
        reaction_id: i64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MoveTarget {
    Step(MoveDirection),
    /// 1-based.
    Position(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MoveSpec {
    id: i64,
    target: MoveTarget,
}

impl FromStr for MoveSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, target) = s
            .split_once(':')
            .ok_or_else(|| format!("expected ID:up, ID:down or ID:POSITION, got '{s}'"))?;
        let id = id
            .trim()
            .parse::<i64>()
            .map_err(|err| format!("invalid id '{id}': {err}"))?;
        let target = match target.trim().to_ascii_lowercase().as_str() {
            "up" => MoveTarget::Step(MoveDirection::Up),
            "down" => MoveTarget::Step(MoveDirection::Down),
            other => match other.parse::<usize>() {
                Ok(position) if position > 0 => MoveTarget::Position(position),
                _ => return Err(format!("invalid move target '{target}'")),
            },
        };
        Ok(Self { id, target })
    }
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if key.trim().is_empty() {
        return Err(format!("empty field name in '{raw}'"));
    }
    Ok((key.trim().to_string(), value.to_string()))
}

struct TerminalNotifier {
    assume_yes: bool,
}

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        println!("{message}");
    }

    fn confirm(&self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{question} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

struct TerminalNavigator {
    client: AdminClient,
}

impl Navigator for TerminalNavigator {
    fn reload(&self) {
        info!("server state changed; reload the page to see it");
    }

    fn redirect(&self, target: &str) {
        println!("Open {}", self.client.url(target));
    }
}

fn apply_moves<A, N, V>(controller: &ReorderController<A, N, V>, moves: &[MoveSpec]) -> Result<()>
where
    A: client_core::AdminApi,
    N: Notifier,
    V: Navigator,
{
    for spec in moves {
        let moved = match spec.target {
            MoveTarget::Step(direction) => controller.apply(spec.id, direction),
            MoveTarget::Position(position) => controller.move_to(spec.id, position),
        };
        moved.with_context(|| format!("cannot move item {}", spec.id))?;
    }
    Ok(())
}

fn format_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

async fn reorder(
    kind: CollectionKind,
    list: OrderedList,
    moves: &[MoveSpec],
    client: &AdminClient,
    assume_yes: bool,
) -> Result<()> {
    let controller = ReorderController::new(
        kind,
        list,
        client.clone(),
        TerminalNotifier { assume_yes },
        TerminalNavigator {
            client: client.clone(),
        },
    );
    apply_moves(&controller, moves)?;
    println!("New order: {}", format_ids(&controller.ids()));
    controller
        .save_order()
        .await
        .context("saving order failed")?;
    Ok(())
}

fn form_fields(pairs: Vec<(String, String)>) -> FormFields {
    pairs.into_iter().collect()
}

async fn run(command: Command, client: AdminClient, assume_yes: bool) -> Result<()> {
    let notifier = TerminalNotifier { assume_yes };
    let navigator = TerminalNavigator {
        client: client.clone(),
    };
    let page = Page::new(&client, &notifier, &navigator);

    match command {
        Command::ReorderLessons { ids, moves } => {
            let list = OrderedList::from_ids(ids)?;
            reorder(CollectionKind::Lessons, list, &moves, &client, assume_yes).await?;
        }
        Command::ReorderSlides {
            lesson_id,
            ids,
            moves,
        } => {
            let list = OrderedList::from_items(
                ids.into_iter()
                    .map(|id| OrderableItem::with_parent(id, lesson_id)),
            )?;
            let kind = CollectionKind::Slides {
                lesson_id: LessonId(lesson_id),
            };
            reorder(kind, list, &moves, &client, assume_yes).await?;
        }
        Command::AddLesson { after } => {
            page.add_lesson(LessonId(after))
                .await
                .context("adding lesson failed")?;
        }
        Command::AddSlide {
            lesson_id,
            slide_type,
            after,
        } => {
            SlideTypeDialog::open(LessonId(lesson_id), after.map(SlideId))
                .select(&page, slide_type)
                .await
                .context("adding slide failed")?;
        }
        Command::SaveSlide {
            slide_id,
            fields,
            picture,
        } => {
            page.save_slide(SlideId(slide_id), &form_fields(fields), picture.as_deref())
                .await
                .context("saving slide failed")?;
        }
        Command::SaveLesson { lesson_id, fields } => {
            page.save_lesson(LessonId(lesson_id), &form_fields(fields))
                .await
                .context("saving lesson failed")?;
        }
        Command::SaveTexts { fields } => {
            page.save_texts(&form_fields(fields))
                .await
                .context("saving texts failed")?;
        }
        Command::SaveReactions {
            fields,
            add_correct,
            add_incorrect,
        } => {
            let mut form = form_fields(fields);
            for text in add_correct {
                form.push(new_reaction_field_name(ReactionKind::Correct), text);
            }
            for text in add_incorrect {
                form.push(new_reaction_field_name(ReactionKind::Incorrect), text);
            }
            page.save_reactions(&form)
                .await
                .context("saving reactions failed")?;
        }
        Command::DeleteLesson { lesson_id } => {
            page.delete_lesson(LessonId(lesson_id))
                .await
                .context("deleting lesson failed")?;
        }
        Command::DeleteSlide { slide_id } => {
            page.delete_slide(SlideId(slide_id))
                .await
                .context("deleting slide failed")?;
        }
        Command::DeleteReaction { reaction_id } => {
            page.delete_reaction(ReactionId(reaction_id))
                .await
                .context("deleting reaction failed")?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();

    let settings = load_settings(cli.config.as_deref(), cli.server_url.as_deref())
        .context("failed to load admin settings")?;
    info!(server_url = %settings.server_url, "using admin backend");

    let client = AdminClient::from_settings(&settings).context("failed to build http client")?;
    run(cli.command, client, cli.yes).await
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
