#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::path::Path;
    use std::rc::Rc;

    use avrprog::message::ConsoleMessages;
    use avrprog::{Catalog, Context, MsgLevel, MsgMode, Origin, Target};

    const FIRST: &str = "[[part]]\nid = \"m168pb\"\n";
    const SECOND: &str = "[[part]]\nid = \"t85\"\n";

    fn parse(content: &str, name: &str) -> Catalog {
        Catalog::parse(content, Path::new(name)).unwrap()
    }

    #[test]
    fn test_last_catalog_wins() {
        let mut ctx = Context::new(parse(FIRST, "first.toml"));
        assert!(ctx.locate_part("m168pb").is_some());

        let previous = ctx.replace_catalog(parse(SECOND, "second.toml"));
        assert_eq!(previous.source(), Path::new("first.toml"));
        assert!(ctx.locate_part("m168pb").is_none());
        assert!(ctx.locate_part("t85").is_some());
        assert_eq!(ctx.catalog().source(), Path::new("second.toml"));
    }

    #[test]
    fn test_independent_contexts() {
        let quiet = Context::new(parse(FIRST, "first.toml"));
        let mut chatty = Context::new(parse(SECOND, "second.toml"));
        chatty.set_verbosity(MsgLevel::Trace2);
        chatty.set_progname("flasher");

        assert_eq!(quiet.verbosity(), MsgLevel::Info);
        assert_eq!(quiet.messages().progname(), "avrprog");
        assert_eq!(chatty.verbosity(), MsgLevel::Trace2);
        assert_eq!(chatty.messages().progname(), "flasher");
        assert!(quiet.locate_part("t85").is_none());
    }

    #[test]
    fn test_emit_message() {
        let mut ctx = Context::new(parse(FIRST, "first.toml"));
        let delivered: Rc<RefCell<Vec<(u32, MsgMode, MsgLevel, String)>>> = Rc::default();
        let sink = Rc::clone(&delivered);
        ctx.register_message_handler(Some(Box::new(
            move |_target: Target,
                  line: u32,
                  _file: &str,
                  _function: &str,
                  mode: MsgMode,
                  level: MsgLevel,
                  text: &str| {
                sink.borrow_mut().push((line, mode, level, text.to_string()));
            },
        )));

        let origin = Origin {
            file: file!(),
            line: line!(),
            function: module_path!(),
        };
        ctx.emit_message(Target::Stderr, MsgLevel::Debug, origin, format_args!("hidden\n"));
        ctx.emit_message(Target::Stderr, MsgLevel::Error, origin, format_args!("{} failed\n", "write"));

        let delivered = delivered.borrow();
        assert_eq!(delivered.len(), 1);
        let (line, mode, level, text) = &delivered[0];
        assert_eq!(*line, origin.line);
        assert!(mode.contains(MsgMode::PROGNAME | MsgMode::TYPE));
        assert_eq!(*level, MsgLevel::Error);
        assert_eq!(text, "write failed\n");
    }

    #[test]
    fn test_progress_handler_registration() {
        let mut ctx = Context::new(parse(FIRST, "first.toml"));
        assert!(ctx.progress_handler().is_none());

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        ctx.register_progress_handler(Some(Box::new(
            move |percent: u8, _elapsed: f64, header: &str, finished: bool| {
                sink.borrow_mut().push((percent, header.to_string(), finished));
            },
        )));

        ctx.progress("Erasing").report(100, None);
        assert_eq!(seen.borrow().as_slice(), [(100, "Erasing".to_string(), true)]);

        ctx.register_progress_handler(None);
        assert!(ctx.progress_handler().is_none());
        ctx.progress("Erasing").report(50, None);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_progname_reaches_console() {
        let mut ctx = Context::new(parse(FIRST, "first.toml"));
        let console = ConsoleMessages::new(ctx.messages().settings());

        ctx.set_progname("flasher");
        ctx.set_verbosity(MsgLevel::Notice);
        let mode = MsgMode::prefixed(MsgLevel::Warning);
        assert_eq!(
            console.render(3, "src/session.rs", "avrprog::session", mode, MsgLevel::Warning, "slow\n"),
            "flasher avrprog::session() warning: slow\n"
        );
    }
}
