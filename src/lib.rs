use std::fmt;
use std::path::Path;

pub use catalog::{Catalog, config_search_path};
pub use error::{AvrError, AvrResult, MemoryFault};
pub use message::{
    MessageDispatch, MessageHandler, MessageSettings, MsgLevel, MsgMode, Origin, Target,
};
pub use part::{MemoryDescriptor, PartDescriptor};
pub use programmer::{ProgrammerDescriptor, ProgrammerDriver, TransportKind};
pub use progress::{ProgressHandler, ProgressReporter};
pub use session::{ProgrammerSession, SessionState};

pub mod catalog;
mod config;
pub(crate) mod constants;
pub mod error;
pub mod firmware;
pub mod interface;
pub mod message;
pub mod opcodes;
pub mod part;
pub mod programmer;
pub mod progress;
pub mod session;
pub(crate) mod util;

/// Everything an operation needs besides its arguments: the loaded catalog,
/// where messages go and where progress goes.
pub struct Context {
    catalog: Catalog,
    messages: MessageDispatch,
    progress: Option<Box<dyn ProgressHandler>>,
}

impl Context {
    pub fn new(catalog: Catalog) -> Self {
        Context {
            catalog,
            messages: MessageDispatch::new(),
            progress: None,
        }
    }

    /// Load a catalog from the first usable source
    pub fn load<P: AsRef<Path>>(sources: &[P]) -> AvrResult<Self> {
        Ok(Self::new(Catalog::load(sources)?))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Swap in another catalog; the last one loaded wins
    pub fn replace_catalog(&mut self, catalog: Catalog) -> Catalog {
        std::mem::replace(&mut self.catalog, catalog)
    }

    pub fn locate_part(&self, id: &str) -> Option<&PartDescriptor> {
        self.catalog.locate_part(id)
    }

    pub fn locate_programmer(&self, id: &str) -> Option<&ProgrammerDescriptor> {
        self.catalog.locate_programmer(id)
    }

    pub fn messages(&self) -> &MessageDispatch {
        &self.messages
    }

    pub fn register_message_handler(&mut self, handler: Option<Box<dyn MessageHandler>>) {
        self.messages.register_handler(handler);
    }

    pub fn register_progress_handler(&mut self, handler: Option<Box<dyn ProgressHandler>>) {
        self.progress = handler;
    }

    pub fn progress_handler(&self) -> Option<&dyn ProgressHandler> {
        self.progress.as_deref()
    }

    /// Start reporting progress of one operation
    pub fn progress(&self, header: &str) -> ProgressReporter<'_> {
        ProgressReporter::new(self.progress_handler(), header)
    }

    pub fn set_verbosity(&mut self, verbosity: MsgLevel) {
        self.messages.set_verbosity(verbosity);
    }

    pub fn verbosity(&self) -> MsgLevel {
        self.messages.verbosity()
    }

    pub fn set_progname(&mut self, progname: &str) {
        self.messages.set_progname(progname);
    }

    /// Report a message on behalf of the caller. Dropped unformatted when
    /// `level` is above the verbosity.
    pub fn emit_message(
        &self,
        target: Target,
        level: MsgLevel,
        origin: Origin,
        args: fmt::Arguments<'_>,
    ) {
        self.messages
            .emit(target, origin, MsgMode::prefixed(level), level, args);
    }

    /// Open a session with the programmer `programmer_id` on `port`
    pub fn open_session(&self, programmer_id: &str, port: &str) -> AvrResult<ProgrammerSession<'_>> {
        let programmer = self.catalog.require_programmer(programmer_id)?;
        ProgrammerSession::open(self, programmer, port)
    }
}
