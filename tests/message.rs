#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::fmt;
    use std::rc::Rc;

    use avrprog::message::ConsoleMessages;
    use avrprog::{MessageDispatch, MessageSettings, MsgLevel, MsgMode, Origin, Target};

    const ORIGIN: Origin = Origin {
        file: "src/session.rs",
        line: 42,
        function: "avrprog::session",
    };

    type Delivered = Rc<RefCell<Vec<(Target, MsgLevel, String)>>>;

    fn dispatch(verbosity: MsgLevel) -> (MessageDispatch, Delivered) {
        let delivered: Delivered = Rc::default();
        let sink = Rc::clone(&delivered);

        let mut dispatch = MessageDispatch::new();
        dispatch.set_verbosity(verbosity);
        dispatch.register_handler(Some(Box::new(
            move |target: Target,
                  _line: u32,
                  _file: &str,
                  _function: &str,
                  _mode: MsgMode,
                  level: MsgLevel,
                  text: &str| {
                sink.borrow_mut().push((target, level, text.to_string()));
            },
        )));

        (dispatch, delivered)
    }

    /// Counts how often it is formatted
    struct Probe<'a>(&'a Cell<usize>);

    impl fmt::Display for Probe<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            self.0.set(self.0.get() + 1);
            write!(f, "probe")
        }
    }

    #[test]
    fn test_threshold_filters_by_level() {
        let (dispatch, delivered) = dispatch(MsgLevel::Warning);

        dispatch.emit(
            Target::Stderr,
            ORIGIN,
            MsgMode::PROGNAME,
            MsgLevel::Debug,
            format_args!("debug detail\n"),
        );
        dispatch.emit(
            Target::Stderr,
            ORIGIN,
            MsgMode::PROGNAME,
            MsgLevel::Error,
            format_args!("it broke\n"),
        );
        dispatch.emit(
            Target::Stdout,
            ORIGIN,
            MsgMode::PROGNAME,
            MsgLevel::Warning,
            format_args!("careful\n"),
        );

        let delivered = delivered.borrow();
        assert_eq!(delivered.len(), 2);
        assert_eq!(
            delivered[0],
            (Target::Stderr, MsgLevel::Error, "it broke\n".to_string())
        );
        assert_eq!(
            delivered[1],
            (Target::Stdout, MsgLevel::Warning, "careful\n".to_string())
        );
    }

    #[test]
    fn test_every_level_against_every_threshold() {
        for threshold in MsgLevel::ALL {
            let (dispatch, delivered) = dispatch(threshold);
            for level in MsgLevel::ALL {
                dispatch.emit(
                    Target::Stderr,
                    ORIGIN,
                    MsgMode::empty(),
                    level,
                    format_args!("{}", level.label()),
                );
            }

            let levels: Vec<MsgLevel> = delivered.borrow().iter().map(|(_, l, _)| *l).collect();
            let expected: Vec<MsgLevel> =
                MsgLevel::ALL.into_iter().filter(|l| *l <= threshold).collect();
            assert_eq!(levels, expected);
        }
    }

    #[test]
    fn test_dropped_messages_are_not_formatted() {
        let (dispatch, delivered) = dispatch(MsgLevel::Info);
        let count = Cell::new(0);

        dispatch.emit(
            Target::Stderr,
            ORIGIN,
            MsgMode::PROGNAME,
            MsgLevel::Trace2,
            format_args!("{}", Probe(&count)),
        );
        assert_eq!(count.get(), 0);

        dispatch.emit(
            Target::Stderr,
            ORIGIN,
            MsgMode::PROGNAME,
            MsgLevel::Info,
            format_args!("{}", Probe(&count)),
        );
        assert_eq!(count.get(), 1);
        assert_eq!(delivered.borrow().len(), 1);
    }

    #[test]
    fn test_handler_can_be_uninstalled() {
        let (mut dispatch, delivered) = dispatch(MsgLevel::Trace2);
        assert!(dispatch.has_handler());

        dispatch.register_handler(None);
        assert!(!dispatch.has_handler());
        assert!(!dispatch.enabled(MsgLevel::Error));

        dispatch.emit(
            Target::Stderr,
            ORIGIN,
            MsgMode::PROGNAME,
            MsgLevel::Error,
            format_args!("nobody listens\n"),
        );
        assert!(delivered.borrow().is_empty());
    }

    #[test]
    fn test_level_indices() {
        assert_eq!(MsgLevel::OsError.index(), 0);
        assert_eq!(MsgLevel::Info.index(), 3);
        assert_eq!(MsgLevel::Trace2.index(), 8);
        assert_eq!(MsgLevel::from_index(6), Some(MsgLevel::Debug));
        assert_eq!(MsgLevel::from_index(9), None);
        assert_eq!(MsgLevel::saturating_from(-3), MsgLevel::OsError);
        assert_eq!(MsgLevel::saturating_from(42), MsgLevel::Trace2);
        assert!(MsgLevel::Error < MsgLevel::Warning);
    }

    #[test]
    fn test_console_prefix() {
        let mode = MsgMode::prefixed(MsgLevel::Error);
        assert!(mode.contains(MsgMode::TYPE));
        assert!(!MsgMode::prefixed(MsgLevel::Info).contains(MsgMode::TYPE));

        let quiet = ConsoleMessages::new(MessageSettings::new("avrprog", MsgLevel::Info));
        assert_eq!(
            quiet.render(42, "src/session.rs", "avrprog::session", mode, MsgLevel::Error, "boom\n"),
            "avrprog error: boom\n"
        );

        let chatty = ConsoleMessages::new(MessageSettings::new("avrprog", MsgLevel::Notice));
        assert_eq!(
            chatty.render(42, "src/session.rs", "avrprog::session", mode, MsgLevel::Error, "boom\n"),
            "avrprog avrprog::session() error: boom\n"
        );

        let debug = ConsoleMessages::new(MessageSettings::new("avrprog", MsgLevel::Debug));
        assert_eq!(
            debug.render(
                42,
                "src/session.rs",
                "avrprog::session",
                MsgMode::prefixed(MsgLevel::Info),
                MsgLevel::Info,
                "hello\n"
            ),
            "avrprog avrprog::session() [session.rs:42]: hello\n"
        );
    }

    #[test]
    fn test_console_indent() {
        let console = ConsoleMessages::new(MessageSettings::new("avrprog", MsgLevel::Info));

        assert_eq!(
            console.render(1, "a.rs", "f", MsgMode::INDENT1, MsgLevel::Info, "more\n"),
            "        more\n"
        );
        assert_eq!(
            console.render(1, "a.rs", "f", MsgMode::INDENT2, MsgLevel::Info, "more\n"),
            "         more\n"
        );
        assert_eq!(
            console.render(1, "a.rs", "f", MsgMode::empty(), MsgLevel::Info, "plain"),
            "plain"
        );
    }

    #[test]
    fn test_console_follows_dispatch_settings() {
        let mut dispatch = MessageDispatch::new();
        let console = ConsoleMessages::new(dispatch.settings());
        let mode = MsgMode::prefixed(MsgLevel::Error);

        assert_eq!(
            console.render(7, "src/lib.rs", "avrprog", mode, MsgLevel::Error, "boom\n"),
            "avrprog error: boom\n"
        );

        dispatch.set_progname("flasher");
        assert_eq!(
            console.render(7, "src/lib.rs", "avrprog", mode, MsgLevel::Error, "boom\n"),
            "flasher error: boom\n"
        );
        assert_eq!(
            console.render(7, "src/lib.rs", "avrprog", MsgMode::INDENT1, MsgLevel::Info, "more\n"),
            "        more\n"
        );

        dispatch.set_verbosity(MsgLevel::Debug);
        assert_eq!(
            console.render(7, "src/lib.rs", "avrprog", mode, MsgLevel::Error, "boom\n"),
            "flasher avrprog() [lib.rs:7] error: boom\n"
        );
    }
}
