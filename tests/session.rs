#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::path::Path;
    use std::rc::Rc;

    use avrprog::programmer::dummy::{CallLog, DummyProgrammer};
    use avrprog::{
        AvrError, Catalog, Context, MemoryFault, MsgLevel, MsgMode, ProgrammerSession,
        SessionState, Target,
    };

    const CATALOG: &str = r#"
[[programmer]]
id = "dryrun"
desc = "Simulated programmer"
type = "virtual"
protocol = "dummy"

[[part]]
id = "m168pb"
desc = "ATmega168PB"
family_id = "megaAVR"
signature = [0x1e, 0x94, 0x15]

[[part.memory]]
name = "signature"
size = 3

[[part.memory]]
name = "flash"
size = 1024
paged = true
page_size = 128

[[part.memory]]
name = "eeprom"
size = 64

[[part.memory]]
name = "calibration"
size = 1

[[part]]
id = "nosig"
desc = "Part without a signature"

[[part.memory]]
name = "flash"
size = 256
paged = true
page_size = 64
"#;

    type Messages = Rc<RefCell<Vec<(MsgLevel, String)>>>;

    fn context() -> Context {
        Context::new(Catalog::parse(CATALOG, Path::new("session.toml")).unwrap())
    }

    fn capture_messages(ctx: &mut Context, verbosity: MsgLevel) -> Messages {
        let messages: Messages = Rc::default();
        let sink = Rc::clone(&messages);
        ctx.set_verbosity(verbosity);
        ctx.register_message_handler(Some(Box::new(
            move |_target: Target,
                  _line: u32,
                  _file: &str,
                  _function: &str,
                  _mode: MsgMode,
                  level: MsgLevel,
                  text: &str| {
                sink.borrow_mut().push((level, text.to_string()));
            },
        )));
        messages
    }

    fn open<'a>(ctx: &'a Context, driver: DummyProgrammer) -> (ProgrammerSession<'a>, CallLog) {
        let log = driver.call_log();
        let programmer = ctx.locate_programmer("dryrun").unwrap();
        let session =
            ProgrammerSession::open_with_driver(ctx, programmer, Box::new(driver), "sim").unwrap();
        (session, log)
    }

    fn initialized<'a>(
        ctx: &'a Context,
        driver: DummyProgrammer,
    ) -> (ProgrammerSession<'a>, CallLog) {
        let (mut session, log) = open(ctx, driver);
        let part = ctx.locate_part("m168pb").unwrap();
        session.enable(part).unwrap();
        session.initialize(part).unwrap();
        (session, log)
    }

    #[test]
    fn test_read_signature_of_simulated_part() {
        let ctx = context();
        let mut session = ctx.open_session("dryrun", "sim").unwrap();
        assert_eq!(session.state(), SessionState::Opened);

        let part = ctx.locate_part("m168pb").unwrap();
        session.enable(part).unwrap();
        assert_eq!(session.state(), SessionState::Enabled);
        session.initialize(part).unwrap();
        assert_eq!(session.state(), SessionState::Initialized);

        let signature = session.read_memory("signature").unwrap();
        assert_eq!(signature, [0x1e, 0x94, 0x15]);
        assert_eq!(session.state(), SessionState::Reading);

        session.disable().unwrap();
        assert_eq!(session.state(), SessionState::Disabled);
        session.close().unwrap();
        assert_eq!(session.state(), SessionState::Closed);
    }

    #[test]
    fn test_initialize_before_enable_fails() {
        let ctx = context();
        let (mut session, log) = open(&ctx, DummyProgrammer::new());
        let part = ctx.locate_part("m168pb").unwrap();

        assert!(matches!(
            session.initialize(part),
            Err(AvrError::OutOfOrder {
                operation: "initialize",
                state: SessionState::Opened
            })
        ));
        assert_eq!(session.state(), SessionState::Opened);
        assert!(!log.borrow().contains(&"initialize"));
    }

    #[test]
    fn test_memory_access_needs_initialize() {
        let ctx = context();
        let (mut session, _log) = open(&ctx, DummyProgrammer::new());
        session.enable(ctx.locate_part("m168pb").unwrap()).unwrap();

        assert!(matches!(
            session.read_memory("flash"),
            Err(AvrError::OutOfOrder { .. })
        ));
        assert!(matches!(
            session.write_memory("flash", &[0; 128]),
            Err(AvrError::OutOfOrder { .. })
        ));
        assert_eq!(session.state(), SessionState::Enabled);
    }

    #[test]
    fn test_enable_twice_is_out_of_order() {
        let ctx = context();
        let (mut session, _log) = initialized(&ctx, DummyProgrammer::new());
        let part = ctx.locate_part("m168pb").unwrap();

        assert!(matches!(
            session.enable(part),
            Err(AvrError::OutOfOrder { .. })
        ));
        assert_eq!(session.state(), SessionState::Initialized);
    }

    #[test]
    fn test_enable_requires_signature() {
        let ctx = context();
        let (mut session, _log) = open(&ctx, DummyProgrammer::new());

        assert!(matches!(
            session.enable(ctx.locate_part("nosig").unwrap()),
            Err(AvrError::Capability(_))
        ));
        assert_eq!(session.state(), SessionState::Opened);
        assert!(session.part().is_none());
    }

    #[test]
    fn test_misaligned_paged_write_keeps_state() {
        let ctx = context();
        let (mut session, _log) = initialized(&ctx, DummyProgrammer::new());

        let result = session.write_memory("flash", &[0xaa; 100]);
        assert!(matches!(
            result,
            Err(AvrError::Memory {
                fault: MemoryFault::Misaligned {
                    len: 100,
                    page_size: 128
                },
                ..
            })
        ));
        assert_eq!(session.state(), SessionState::Initialized);
    }

    #[test]
    fn test_rejected_writes() {
        let ctx = context();
        let (mut session, _log) = initialized(&ctx, DummyProgrammer::new());

        let fault = |result: Result<(), AvrError>| match result {
            Err(AvrError::Memory { fault, .. }) => fault,
            other => panic!("expected a memory error, got {:?}", other),
        };

        assert_eq!(
            fault(session.write_memory("flash", &[0; 1152])),
            MemoryFault::TooLarge {
                len: 1152,
                size: 1024
            }
        );
        assert_eq!(
            fault(session.write_memory("signature", &[0; 3])),
            MemoryFault::ReadOnly
        );
        assert_eq!(
            fault(session.write_memory("calibration", &[0x80])),
            MemoryFault::ReadOnly
        );
        assert_eq!(
            fault(session.write_memory("fuse", &[0])),
            MemoryFault::Unknown
        );
        assert_eq!(session.state(), SessionState::Initialized);

        assert!(matches!(
            session.read_memory("sigrow"),
            Err(AvrError::Memory {
                fault: MemoryFault::Unknown,
                ..
            })
        ));
    }

    #[test]
    fn test_write_then_read_back() {
        let ctx = context();
        let (mut session, _log) = initialized(&ctx, DummyProgrammer::new());
        session.set_verify(true);

        let image: Vec<u8> = (0..256).map(|i| i as u8).collect();
        session.write_memory("flash", &image).unwrap();
        assert_eq!(session.state(), SessionState::Writing);

        let flash = session.read_memory("flash").unwrap();
        assert_eq!(flash.len(), 1024);
        assert_eq!(&flash[..256], image.as_slice());
        assert!(flash[256..].iter().all(|&b| b == 0xff));
        assert_eq!(session.state(), SessionState::Reading);

        // Unpaged memories take any length up to their size
        session.write_memory("eeprom", &[1, 2, 3]).unwrap();
        assert_eq!(&session.read_memory("eeprom").unwrap()[..4], [1, 2, 3, 0xff]);
    }

    #[test]
    fn test_erase_chip() {
        let ctx = context();
        let (mut session, log) = initialized(&ctx, DummyProgrammer::new());

        session.write_memory("flash", &[0; 128]).unwrap();
        session.erase_chip().unwrap();

        assert!(session.read_memory("flash").unwrap().iter().all(|&b| b == 0xff));
        assert!(log.borrow().contains(&"chip_erase"));
    }

    #[test]
    fn test_partial_write_reports_offset() {
        let ctx = context();
        let (mut session, log) =
            initialized(&ctx, DummyProgrammer::new().fail_write_at("flash", 300));

        match session.write_memory("flash", &[0x55; 512]) {
            Err(AvrError::PartialWrite { memory, offset, .. }) => {
                assert_eq!(memory, "flash");
                assert_eq!(offset, 256);
            }
            other => panic!("expected a partial write, got {:?}", other),
        }

        // Cleanup still runs after the failure
        session.close().unwrap();
        assert_eq!(session.state(), SessionState::Closed);
        assert_eq!(
            log.borrow().as_slice(),
            ["open", "enable", "initialize", "disable", "close"]
        );
    }

    #[test]
    fn test_disable_is_idempotent() {
        let ctx = context();
        let (mut session, log) = initialized(&ctx, DummyProgrammer::new());

        session.disable().unwrap();
        session.disable().unwrap();
        assert_eq!(session.state(), SessionState::Disabled);

        session.close().unwrap();
        session.close().unwrap();
        assert_eq!(session.state(), SessionState::Closed);

        assert!(matches!(
            session.disable(),
            Err(AvrError::OutOfOrder { .. })
        ));
        assert_eq!(
            log.borrow().iter().filter(|c| **c == "disable").count(),
            1
        );
        assert_eq!(log.borrow().iter().filter(|c| **c == "close").count(), 1);
    }

    #[test]
    fn test_drop_runs_cleanup() {
        let ctx = context();
        let log = {
            let (session, log) = initialized(&ctx, DummyProgrammer::new());
            assert_eq!(session.state(), SessionState::Initialized);
            log
        };

        assert_eq!(
            log.borrow().as_slice(),
            ["open", "enable", "initialize", "disable", "close"]
        );
    }

    #[test]
    fn test_signature_mismatch() {
        let mut ctx = context();
        let messages = capture_messages(&mut ctx, MsgLevel::Info);
        let part = ctx.locate_part("m168pb").unwrap();

        let (mut session, _log) = open(
            &ctx,
            DummyProgrammer::new().with_signature([0x1e, 0x95, 0x0f]),
        );
        session.enable(part).unwrap();
        assert!(matches!(session.initialize(part), Err(AvrError::Init(_))));
        assert_eq!(session.state(), SessionState::Enabled);

        assert!(messages
            .borrow()
            .iter()
            .any(|(level, text)| *level == MsgLevel::Error && text.contains("signature mismatch")));
    }

    #[test]
    fn test_forced_signature_mismatch_warns() {
        let mut ctx = context();
        let messages = capture_messages(&mut ctx, MsgLevel::Warning);
        let part = ctx.locate_part("m168pb").unwrap();

        let (mut session, _log) = open(
            &ctx,
            DummyProgrammer::new().with_signature([0xff, 0xff, 0xff]),
        );
        session.set_force(true);
        session.enable(part).unwrap();
        session.initialize(part).unwrap();
        assert_eq!(session.state(), SessionState::Initialized);

        let messages = messages.borrow();
        assert!(messages.iter().all(|(level, _)| *level <= MsgLevel::Warning));
        assert!(messages
            .iter()
            .any(|(level, text)| *level == MsgLevel::Warning && text.contains("continuing")));
    }

    #[test]
    fn test_unresponsive_target() {
        let ctx = context();
        let part = ctx.locate_part("m168pb").unwrap();
        let (mut session, log) = open(&ctx, DummyProgrammer::new().unresponsive());

        session.enable(part).unwrap();
        assert!(matches!(session.initialize(part), Err(AvrError::Init(_))));

        drop(session);
        assert_eq!(log.borrow().last(), Some(&"close"));
    }

    #[test]
    fn test_open_failure_is_transport_error() {
        let ctx = context();
        let programmer = ctx.locate_programmer("dryrun").unwrap();
        let driver = DummyProgrammer::new();
        let log = driver.call_log();

        let result = ProgrammerSession::open_with_driver(&ctx, programmer, Box::new(driver), "");
        assert!(matches!(result, Err(AvrError::Transport(_))));
        assert_eq!(log.borrow().as_slice(), ["open", "close"]);

        assert!(matches!(
            ctx.open_session("usbasp", "usb"),
            Err(AvrError::LookupMiss { .. })
        ));
    }

    #[test]
    fn test_progress_of_read() {
        let mut ctx = context();
        let reports: Rc<RefCell<Vec<(u8, String, bool)>>> = Rc::default();
        let sink = Rc::clone(&reports);
        ctx.register_progress_handler(Some(Box::new(
            move |percent: u8, _elapsed: f64, header: &str, finished: bool| {
                sink.borrow_mut().push((percent, header.to_string(), finished));
            },
        )));

        let (mut session, _log) = initialized(&ctx, DummyProgrammer::new());
        session.read_memory("flash").unwrap();

        let reports = reports.borrow();
        assert_eq!(reports.len(), 8);
        assert!(reports.windows(2).all(|w| w[0].0 <= w[1].0));
        assert!(reports.iter().all(|(_, header, _)| header == "Reading"));
        assert_eq!(reports.iter().filter(|(_, _, finished)| *finished).count(), 1);
        assert_eq!(reports.last(), Some(&(100, "Reading".to_string(), true)));
    }

    #[test]
    fn test_empty_write_completes_progress() {
        let mut ctx = context();
        let reports: Rc<RefCell<Vec<(u8, String, bool)>>> = Rc::default();
        let sink = Rc::clone(&reports);
        ctx.register_progress_handler(Some(Box::new(
            move |percent: u8, _elapsed: f64, header: &str, finished: bool| {
                sink.borrow_mut().push((percent, header.to_string(), finished));
            },
        )));

        let (mut session, _log) = initialized(&ctx, DummyProgrammer::new());
        session.write_memory("flash", &[]).unwrap();
        assert_eq!(session.state(), SessionState::Writing);

        assert_eq!(
            reports.borrow().as_slice(),
            [(100, "Writing".to_string(), true)]
        );
    }
}
