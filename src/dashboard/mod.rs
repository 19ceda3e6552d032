//! Interactive composition of the draft form, ticket list and stats panel.
//!
//! All state lives in [`Dashboard`] and is only touched from its event loop.
//! Network calls run as spawned tasks that post an [`Event`] back to the loop,
//! so the prompt stays responsive while a request is outstanding.

pub mod command;
pub mod debounce;
pub mod refresh;

use std::future::Future;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::{mpsc, watch};

use crate::context::AppContext;
use crate::domain::filter::FilterField;
use crate::domain::stats::TicketStats;
use crate::domain::ticket::{Status, Suggestion, Ticket, TicketId};
use crate::error::{AppError, AppResult};
use crate::render;
use crate::services::{TicketAssistant, TicketStore};
use crate::workflow::draft::DraftWorkflow;
use crate::workflow::stats::{StatsPanel, StatsState};
use crate::workflow::ticket_list::TicketListView;

use self::command::{Command, HELP};
use self::debounce::Debouncer;
use self::refresh::RefreshSignal;

/// Something that happened outside the prompt: a timer fired, a request
/// finished, or a ticket was created.
#[derive(Debug)]
pub enum Event {
    FetchDue,
    Refresh,
    TicketsLoaded {
        seq: u64,
        result: AppResult<Vec<Ticket>>,
    },
    StatsLoaded {
        seq: u64,
        result: AppResult<TicketStats>,
    },
    Classified(AppResult<Suggestion>),
    Submitted(AppResult<Ticket>),
    StatusUpdated {
        id: TicketId,
        status: Status,
        result: AppResult<Ticket>,
    },
    SolutionReady {
        seq: u64,
        result: AppResult<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Dashboard<W: Write> {
    store: Arc<dyn TicketStore>,
    assistant: Arc<dyn TicketAssistant>,
    // Owns the channel; the draft publishes through a notifier.
    _refresh: RefreshSignal,
    refresh_rx: watch::Receiver<u64>,
    draft: DraftWorkflow,
    list: TicketListView,
    stats: StatsPanel,
    debouncer: Debouncer,
    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
    out: W,
}

impl<W: Write> Dashboard<W> {
    pub fn new(ctx: &AppContext, out: W) -> Self {
        Self::with_services(
            Arc::clone(&ctx.store),
            Arc::clone(&ctx.assistant),
            ctx.config.search_debounce,
            out,
        )
    }

    pub fn with_services(
        store: Arc<dyn TicketStore>,
        assistant: Arc<dyn TicketAssistant>,
        debounce: Duration,
        out: W,
    ) -> Self {
        let refresh = RefreshSignal::new();
        let refresh_rx = refresh.subscribe();
        let draft = DraftWorkflow::new(refresh.notifier());
        let (tx, rx) = mpsc::unbounded_channel();

        Self {
            store,
            assistant,
            _refresh: refresh,
            refresh_rx,
            draft,
            list: TicketListView::new(),
            stats: StatsPanel::new(),
            debouncer: Debouncer::new(debounce),
            tx,
            rx,
            out,
        }
    }

    pub async fn run<R>(mut self, input: R) -> AppResult<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        writeln!(self.out, "Ticket dashboard. Type 'help' for commands.")?;
        self.start();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    match self.handle_line(&line) {
                        Ok(Flow::Quit) => break,
                        Ok(Flow::Continue) => {}
                        Err(err) => self.report(&err)?,
                    }
                }
                Some(event) = self.next_event() => {
                    if let Err(err) = self.handle_event(event) {
                        self.report(&err)?;
                    }
                }
            }
        }
        self.debouncer.cancel();
        Ok(())
    }

    /// Initial load of the list and the stats panel.
    pub fn start(&mut self) {
        self.fetch_tickets_now();
        self.fetch_stats();
    }

    pub async fn next_event(&mut self) -> Option<Event> {
        tokio::select! {
            event = self.rx.recv() => event,
            changed = self.refresh_rx.changed() => changed.ok().map(|_| Event::Refresh),
        }
    }

    pub fn handle_line(&mut self, line: &str) -> AppResult<Flow> {
        match Command::parse(line)? {
            Some(command) => self.handle_command(command),
            None => Ok(Flow::Continue),
        }
    }

    pub fn handle_command(&mut self, command: Command) -> AppResult<Flow> {
        match command {
            Command::Search(text) => self.change_filter(FilterField::Search, text),
            Command::Filter(field, value) => self.change_filter(field, value),
            Command::ClearFilters => {
                if self.list.clear_filters() {
                    self.schedule_fetch();
                }
            }
            Command::List => {
                if self.debouncer.is_pending() {
                    writeln!(self.out, "(refresh pending)")?;
                }
                writeln!(self.out, "{}", render::ticket_list(&self.list))?;
            }
            Command::SetStatus(id, status) => self.update_status(id, status),
            Command::Ask(id) => self.ask(id)?,
            Command::Dismiss => self.list.dismiss_insight(),
            Command::Title(title) => {
                self.draft.set_title(title)?;
                self.show_draft()?;
            }
            Command::Description(description) => {
                self.draft.set_description(description)?;
                self.show_draft()?;
            }
            Command::ShowDraft => self.show_draft()?,
            Command::Analyze => self.analyze()?,
            Command::Category(category) => {
                self.draft.set_category(category)?;
                self.show_draft()?;
            }
            Command::Priority(priority) => {
                self.draft.set_priority(priority)?;
                self.show_draft()?;
            }
            Command::Back => {
                self.draft.back()?;
                self.show_draft()?;
            }
            Command::Review => {
                self.draft.resume_review()?;
                self.show_draft()?;
            }
            Command::Confirm => self.confirm()?,
            Command::Stats => self.show_stats()?,
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    pub fn handle_event(&mut self, event: Event) -> AppResult<()> {
        match event {
            Event::FetchDue => self.fetch_tickets_now(),
            Event::Refresh => {
                self.fetch_tickets_now();
                self.fetch_stats();
            }
            Event::TicketsLoaded { seq, result } => {
                let applied = self.list.apply_fetch(seq, result).map_err(|err| {
                    tracing::warn!(error = %err, "failed to load tickets");
                    err
                })?;
                if applied {
                    writeln!(self.out, "{}", render::ticket_list(&self.list))?;
                }
            }
            Event::StatsLoaded { seq, result } => {
                self.stats.apply_fetch(seq, result);
                if matches!(self.stats.state(), StatsState::Loaded(_)) {
                    writeln!(self.out, "{}", render::stats_panel(&self.stats))?;
                }
            }
            Event::Classified(result) => {
                self.draft.complete_analyze(result);
                self.show_draft()?;
            }
            Event::Submitted(result) => match self.draft.complete_submit(result) {
                Ok(ticket) => writeln!(self.out, "Ticket #{} created.", ticket.id)?,
                Err(err) => writeln!(self.out, "Submission failed: {err}")?,
            },
            Event::StatusUpdated { id, status, result } => match result {
                Ok(_) => {
                    writeln!(self.out, "Ticket #{id} is now {status}.")?;
                    self.fetch_tickets_now();
                }
                Err(err) => writeln!(self.out, "Status update failed: {err}")?,
            },
            Event::SolutionReady { seq, result } => {
                if self.list.complete_solution(seq, result) {
                    if let Some(insight) = self.list.active_insight() {
                        writeln!(self.out, "{}", render::insight(insight))?;
                    }
                }
            }
        }
        Ok(())
    }

    fn change_filter(&mut self, field: FilterField, value: String) {
        if self.list.set_filter(field, value) {
            self.schedule_fetch();
        }
    }

    fn schedule_fetch(&mut self) {
        let tx = self.tx.clone();
        self.debouncer.schedule(async move {
            let _ = tx.send(Event::FetchDue);
        });
    }

    fn fetch_tickets_now(&mut self) {
        self.debouncer.cancel();
        let request = self.list.begin_fetch();
        let store = Arc::clone(&self.store);
        self.spawn(async move {
            let result = store.list_tickets(&request.criteria).await;
            Event::TicketsLoaded {
                seq: request.seq,
                result,
            }
        });
    }

    fn fetch_stats(&mut self) {
        let seq = self.stats.begin_fetch();
        let store = Arc::clone(&self.store);
        self.spawn(async move {
            let result = store.stats().await;
            Event::StatsLoaded { seq, result }
        });
    }

    fn update_status(&mut self, id: TicketId, status: Status) {
        let store = Arc::clone(&self.store);
        self.spawn(async move {
            let result = store.update_status(id, status).await;
            Event::StatusUpdated { id, status, result }
        });
    }

    fn ask(&mut self, id: TicketId) -> AppResult<()> {
        if !self.list.solution_enabled() {
            return Err(AppError::InFlight("a solution lookup"));
        }
        let description = self
            .list
            .find(id)
            .map(|ticket| ticket.description.clone())
            .ok_or_else(|| AppError::Validation(format!("ticket #{id} is not in the list")))?;

        let request = self.list.begin_solution(description);
        let assistant = Arc::clone(&self.assistant);
        self.spawn(async move {
            let result = assistant.suggest_solution(&request.description).await;
            Event::SolutionReady {
                seq: request.seq,
                result,
            }
        });
        writeln!(self.out, "Thinking...")?;
        Ok(())
    }

    fn analyze(&mut self) -> AppResult<()> {
        let request = self.draft.begin_analyze()?;
        let assistant = Arc::clone(&self.assistant);
        self.spawn(async move { Event::Classified(assistant.classify(&request.description).await) });
        writeln!(self.out, "Processing...")?;
        Ok(())
    }

    fn confirm(&mut self) -> AppResult<()> {
        let new_ticket = self.draft.begin_submit()?;
        let store = Arc::clone(&self.store);
        self.spawn(async move { Event::Submitted(store.create_ticket(new_ticket).await) });
        writeln!(self.out, "Submitting...")?;
        Ok(())
    }

    fn show_draft(&mut self) -> AppResult<()> {
        writeln!(self.out, "{}", render::draft(&self.draft))?;
        Ok(())
    }

    fn show_stats(&mut self) -> AppResult<()> {
        writeln!(self.out, "{}", render::stats_panel(&self.stats))?;
        if let StatsState::Loaded(stats) = self.stats.state() {
            writeln!(self.out, "By category: {}", render::category_breakdown(stats))?;
        }
        Ok(())
    }

    fn report(&mut self, err: &AppError) -> AppResult<()> {
        writeln!(self.out, "! {err}")?;
        Ok(())
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = Event> + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(task.await);
        });
    }
}
