use clap::Args;

use crate::cmd::prompt::ask_text;
use crate::context::AppContext;
use crate::dashboard::refresh::RefreshNotifier;
use crate::domain::filter::FilterField;
use crate::domain::ticket::{Category, Priority, Status, TicketDraft, TicketId};
use crate::error::{AppError, AppResult};
use crate::render;
use crate::workflow::draft::DraftWorkflow;
use crate::workflow::ticket_list::TicketListView;

const STATUS_VALUES: [&str; 4] = ["open", "in_progress", "resolved", "closed"];
const PRIORITY_VALUES: [&str; 4] = ["low", "medium", "high", "critical"];
const CATEGORY_VALUES: [&str; 4] = ["general", "technical", "billing", "account"];

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Match text in titles and descriptions.
    #[arg(short, long)]
    pub search: Option<String>,
    #[arg(long, value_parser = STATUS_VALUES)]
    pub status: Option<String>,
    #[arg(long, value_parser = PRIORITY_VALUES)]
    pub priority: Option<String>,
    #[arg(long, value_parser = CATEGORY_VALUES)]
    pub category: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct NewArgs {
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub description: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    pub id: u64,
    #[arg(value_parser = parse_status)]
    pub status: Status,
}

#[derive(Args, Debug, Clone)]
pub struct SuggestArgs {
    /// Ticket whose description is sent to the AI.
    #[arg(required_unless_present = "text")]
    pub id: Option<u64>,
    /// Ask about free text instead of an existing ticket.
    #[arg(long, conflicts_with = "id")]
    pub text: Option<String>,
}

fn parse_status(value: &str) -> Result<Status, String> {
    Status::from_str(value).ok_or_else(|| format!("expected one of {}", STATUS_VALUES.join(", ")))
}

pub async fn run_list(ctx: &AppContext, args: ListArgs) -> AppResult<()> {
    let mut view = TicketListView::new();
    let filters = [
        (FilterField::Search, args.search),
        (FilterField::Status, args.status),
        (FilterField::Priority, args.priority),
        (FilterField::Category, args.category),
    ];
    for (field, value) in filters {
        if let Some(value) = value {
            view.set_filter(field, value);
        }
    }

    view.refresh(ctx.store.as_ref()).await?;
    println!("{}", render::ticket_list(&view));
    Ok(())
}

pub async fn run_status(ctx: &AppContext, args: StatusArgs) -> AppResult<()> {
    let mut view = TicketListView::new();
    let id = TicketId(args.id);
    let change = view.update_status(ctx.store.as_ref(), id, args.status).await?;

    println!("Ticket #{} is now {}.", change.ticket.id, change.ticket.status);
    change.refreshed?;
    println!("{}", render::ticket_list(&view));
    Ok(())
}

pub async fn run_suggest(ctx: &AppContext, args: SuggestArgs) -> AppResult<()> {
    let mut view = TicketListView::new();
    let description = match (args.text, args.id) {
        (Some(text), _) => text,
        (None, Some(id)) => {
            view.refresh(ctx.store.as_ref()).await?;
            view.find(TicketId(id))
                .map(|ticket| ticket.description.clone())
                .ok_or_else(|| AppError::Validation(format!("ticket #{id} not found")))?
        }
        (None, None) => {
            return Err(AppError::Validation(
                "pass a ticket id or --text".to_string(),
            ));
        }
    };

    println!("Thinking...");
    if let Some(insight) = view
        .request_solution(ctx.assistant.as_ref(), description)
        .await
    {
        println!("{}", render::insight(insight));
    }
    Ok(())
}

/// Walks a draft through edit, AI review and submission on stdin.
pub async fn run_new(ctx: &AppContext, args: NewArgs) -> AppResult<()> {
    let mut workflow = DraftWorkflow::new(RefreshNotifier::detached());
    let mut initial = TicketDraft::new(
        args.title.unwrap_or_default(),
        args.description.unwrap_or_default(),
    );
    let mut skip_prompt = initial.is_complete();

    loop {
        let before = workflow.state().draft().clone();
        let draft = if skip_prompt {
            std::mem::take(&mut initial)
        } else {
            let seed = if before.is_empty() { &initial } else { &before };
            TicketDraft::new(
                ask_text("Subject", &seed.title)?,
                ask_text("Issue description", &seed.description)?,
            )
        };
        skip_prompt = false;

        let unchanged = draft == before && workflow.state().classification().is_some();
        workflow.set_title(draft.title)?;
        workflow.set_description(draft.description)?;

        let entered_review = if unchanged {
            workflow.resume_review()
        } else {
            println!("Processing...");
            workflow.analyze(ctx.assistant.as_ref()).await.map(|_| ())
        };
        match entered_review {
            Ok(()) => {}
            Err(AppError::Validation(message)) => {
                eprintln!("{message}");
                continue;
            }
            Err(err) => return Err(err),
        }

        match review(ctx, &mut workflow).await? {
            ReviewOutcome::Submitted => return Ok(()),
            ReviewOutcome::Abandoned => {
                println!("Draft discarded.");
                return Ok(());
            }
            ReviewOutcome::Back => workflow.back()?,
        }
    }
}

enum ReviewOutcome {
    Submitted,
    Back,
    Abandoned,
}

async fn review(ctx: &AppContext, workflow: &mut DraftWorkflow) -> AppResult<ReviewOutcome> {
    if !workflow.state().is_review() {
        return Err(AppError::InvalidState("the draft has not been classified".to_string()));
    }
    println!("{}", render::draft(workflow));
    if let Some(current) = workflow.state().classification() {
        let category = ask_choice("Classification", current.category.as_str(), Category::from_str)?;
        workflow.set_category(category)?;
        let priority = ask_choice("Urgency level", current.priority.as_str(), Priority::from_str)?;
        workflow.set_priority(priority)?;
    }

    loop {
        println!("{}", render::draft(workflow));
        let answer = ask_text("Confirm & submit? (y)es, (b)ack, (q)uit", "")?;
        match parse_review_choice(&answer) {
            Some(ReviewChoice::Submit) => match workflow.confirm(ctx.store.as_ref()).await {
                Ok(ticket) => {
                    println!("Ticket #{} created.", ticket.id);
                    return Ok(ReviewOutcome::Submitted);
                }
                Err(err) => eprintln!("Submission failed: {err}"),
            },
            Some(ReviewChoice::Back) => return Ok(ReviewOutcome::Back),
            Some(ReviewChoice::Quit) => return Ok(ReviewOutcome::Abandoned),
            None => eprintln!("Answer y, b or q."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReviewChoice {
    Submit,
    Back,
    Quit,
}

/// Submitting always takes an explicit answer.
fn parse_review_choice(answer: &str) -> Option<ReviewChoice> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(ReviewChoice::Submit),
        "b" | "back" => Some(ReviewChoice::Back),
        "q" | "quit" => Some(ReviewChoice::Quit),
        _ => None,
    }
}

fn ask_choice<T>(field: &str, current: &str, parse: fn(&str) -> Option<T>) -> AppResult<T> {
    loop {
        let answer = ask_text(field, current)?;
        match parse(&answer) {
            Some(value) => return Ok(value),
            None => eprintln!("Unknown {} '{answer}'.", field.to_lowercase()),
        }
    }
}
