use std::cell::RefCell;
use std::fmt;
use std::path::Path;
use std::rc::Rc;

use bitflags::bitflags;

use crate::constants::DEFAULT_PROGNAME;

/// Message severity, most severe first.
/// A message is delivered iff `verbosity >= level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum MsgLevel {
    OsError = 0,
    Error = 1,
    Warning = 2,
    Info = 3,
    Notice = 4,
    Notice2 = 5,
    Debug = 6,
    Trace = 7,
    Trace2 = 8,
}

impl MsgLevel {
    pub const ALL: [MsgLevel; 9] = [
        MsgLevel::OsError,
        MsgLevel::Error,
        MsgLevel::Warning,
        MsgLevel::Info,
        MsgLevel::Notice,
        MsgLevel::Notice2,
        MsgLevel::Debug,
        MsgLevel::Trace,
        MsgLevel::Trace2,
    ];

    pub fn from_index(index: i32) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Like `from_index` but clamps out-of-range values to the nearest level
    pub fn saturating_from(index: i32) -> Self {
        let i = index.clamp(0, Self::ALL.len() as i32 - 1);
        Self::ALL[i as usize]
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            MsgLevel::OsError => "OS error",
            MsgLevel::Error => "error",
            MsgLevel::Warning => "warning",
            MsgLevel::Info => "info",
            MsgLevel::Notice => "notice",
            MsgLevel::Notice2 => "notice2",
            MsgLevel::Debug => "debug",
            MsgLevel::Trace => "trace",
            MsgLevel::Trace2 => "trace2",
        }
    }
}

bitflags! {
    /// How a handler should decorate the message text
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MsgMode: u32 {
        const PROGNAME = 1;
        const FUNCTION = 1 << 1;
        const FILELINE = 1 << 2;
        const TYPE = 1 << 3;
        const INDENT1 = 1 << 4;
        const INDENT2 = 1 << 5;
    }
}

impl MsgMode {
    /// Mode used for messages that start a new line of output
    pub fn prefixed(level: MsgLevel) -> Self {
        let mode = MsgMode::PROGNAME | MsgMode::FUNCTION | MsgMode::FILELINE;
        if level <= MsgLevel::Warning {
            mode | MsgMode::TYPE
        } else {
            mode
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Stdout,
    Stderr,
}

impl Target {
    pub fn as_str(self) -> &'static str {
        match self {
            Target::Stdout => "stdout",
            Target::Stderr => "stderr",
        }
    }
}

/// Where a message was raised. `function` holds the module path of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Origin {
    pub file: &'static str,
    pub line: u32,
    pub function: &'static str,
}

pub trait MessageHandler {
    #[allow(clippy::too_many_arguments)]
    fn message(
        &self,
        target: Target,
        line: u32,
        file: &str,
        function: &str,
        mode: MsgMode,
        level: MsgLevel,
        text: &str,
    );
}

impl<F> MessageHandler for F
where
    F: Fn(Target, u32, &str, &str, MsgMode, MsgLevel, &str),
{
    fn message(
        &self,
        target: Target,
        line: u32,
        file: &str,
        function: &str,
        mode: MsgMode,
        level: MsgLevel,
        text: &str,
    ) {
        self(target, line, file, function, mode, level, text)
    }
}

struct SettingsInner {
    progname: String,
    verbosity: MsgLevel,
}

/// Program name and verbosity, shared between the dispatch and the handlers
/// that decorate its output. Clones see each other's updates.
#[derive(Clone)]
pub struct MessageSettings {
    inner: Rc<RefCell<SettingsInner>>,
}

impl MessageSettings {
    pub fn new(progname: &str, verbosity: MsgLevel) -> Self {
        MessageSettings {
            inner: Rc::new(RefCell::new(SettingsInner {
                progname: progname.to_owned(),
                verbosity,
            })),
        }
    }

    pub fn progname(&self) -> String {
        self.inner.borrow().progname.clone()
    }

    pub fn set_progname(&self, progname: &str) {
        self.inner.borrow_mut().progname = progname.to_owned();
    }

    pub fn verbosity(&self) -> MsgLevel {
        self.inner.borrow().verbosity
    }

    pub fn set_verbosity(&self, verbosity: MsgLevel) {
        self.inner.borrow_mut().verbosity = verbosity;
    }
}

impl Default for MessageSettings {
    fn default() -> Self {
        Self::new(DEFAULT_PROGNAME, MsgLevel::Info)
    }
}

/// The registered message handler plus the settings that gate it
#[derive(Default)]
pub struct MessageDispatch {
    settings: MessageSettings,
    handler: Option<Box<dyn MessageHandler>>,
}

impl MessageDispatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a handler, replacing the current one; `None` uninstalls
    pub fn register_handler(&mut self, handler: Option<Box<dyn MessageHandler>>) {
        self.handler = handler;
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Handle on the live settings, for handlers that render prefixes
    pub fn settings(&self) -> MessageSettings {
        self.settings.clone()
    }

    pub fn set_verbosity(&mut self, verbosity: MsgLevel) {
        self.settings.set_verbosity(verbosity);
    }

    pub fn verbosity(&self) -> MsgLevel {
        self.settings.verbosity()
    }

    pub fn set_progname(&mut self, progname: &str) {
        self.settings.set_progname(progname);
    }

    pub fn progname(&self) -> String {
        self.settings.progname()
    }

    pub fn enabled(&self, level: MsgLevel) -> bool {
        self.handler.is_some() && self.verbosity() >= level
    }

    pub fn emit(
        &self,
        target: Target,
        origin: Origin,
        mode: MsgMode,
        level: MsgLevel,
        args: fmt::Arguments<'_>,
    ) {
        if self.verbosity() < level {
            return;
        }
        let Some(handler) = &self.handler else {
            return;
        };

        let text = fmt::format(args);
        handler.message(
            target,
            origin.line,
            origin.file,
            origin.function,
            mode,
            level,
            &text,
        );
    }
}

/// Report a message that starts its own line of output
macro_rules! pmsg {
    ($dispatch:expr, $level:ident, $($arg:tt)*) => {
        $dispatch.emit(
            $crate::message::Target::Stderr,
            $crate::message::Origin {
                file: file!(),
                line: line!(),
                function: module_path!(),
            },
            $crate::message::MsgMode::prefixed($crate::message::MsgLevel::$level),
            $crate::message::MsgLevel::$level,
            format_args!($($arg)*),
        )
    };
}

/// Report a continuation line aligned under the program name
macro_rules! imsg {
    ($dispatch:expr, $level:ident, $($arg:tt)*) => {
        $dispatch.emit(
            $crate::message::Target::Stderr,
            $crate::message::Origin {
                file: file!(),
                line: line!(),
                function: module_path!(),
            },
            $crate::message::MsgMode::INDENT1,
            $crate::message::MsgLevel::$level,
            format_args!($($arg)*),
        )
    };
}

pub(crate) use {imsg, pmsg};

/// Terminal message handler writing to stdout or stderr
pub struct ConsoleMessages {
    settings: MessageSettings,
}

impl ConsoleMessages {
    pub fn new(settings: MessageSettings) -> Self {
        ConsoleMessages { settings }
    }

    /// Decorate `text` according to `mode`
    pub fn render(
        &self,
        line: u32,
        file: &str,
        function: &str,
        mode: MsgMode,
        level: MsgLevel,
        text: &str,
    ) -> String {
        let progname = self.settings.progname();
        let verbosity = self.settings.verbosity();
        let mut s = String::new();

        if mode.contains(MsgMode::PROGNAME) {
            s.push_str(&progname);
            if verbosity >= MsgLevel::Notice && mode.contains(MsgMode::FUNCTION) {
                s.push_str(&format!(" {}()", function));
            }
            if verbosity >= MsgLevel::Debug && mode.contains(MsgMode::FILELINE) {
                let name = Path::new(file)
                    .file_name()
                    .map(|n| n.to_string_lossy())
                    .unwrap_or_else(|| file.into());
                s.push_str(&format!(" [{}:{}]", name, line));
            }
            if mode.contains(MsgMode::TYPE) {
                s.push(' ');
                s.push_str(level.label());
            }
            s.push_str(": ");
        } else if mode.contains(MsgMode::INDENT1) {
            s.push_str(&" ".repeat(progname.len() + 1));
        } else if mode.contains(MsgMode::INDENT2) {
            s.push_str(&" ".repeat(progname.len() + 2));
        }

        s.push_str(text);
        s
    }
}

impl MessageHandler for ConsoleMessages {
    fn message(
        &self,
        target: Target,
        line: u32,
        file: &str,
        function: &str,
        mode: MsgMode,
        level: MsgLevel,
        text: &str,
    ) {
        let rendered = self.render(line, file, function, mode, level, text);
        match target {
            Target::Stdout => print!("{}", rendered),
            Target::Stderr => eprint!("{}", rendered),
        }
    }
}
