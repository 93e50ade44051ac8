#[cfg(test)]
mod tests {
    use std::path::Path;

    use avrprog::programmer::driver_for;
    use avrprog::{Context, ProgrammerSession, SessionState, firmware};

    // Needs an Arduino Uno on /dev/ttyUSB0 and a blink.hex next to this file
    #[test]
    #[ignore]
    fn test_arduino_programming() {
        let catalog = Path::new(env!("CARGO_MANIFEST_DIR")).join("avrprog.toml");
        let blink_hex = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/blink.hex");
        let port = "/dev/ttyUSB0";

        let ctx = Context::load(&[catalog]).unwrap();
        let part = ctx.locate_part("m328p").unwrap();
        let flash = part.locate_memory("flash").unwrap();

        let mut image = firmware::read_hex_file(&blink_hex).unwrap();
        firmware::pad_to_page(&mut image, flash.page_size());

        // Catalog baud rate
        {
            let mut session = ctx.open_session("arduino", port).unwrap();
            session.enable(part).unwrap();
            session.initialize(part).unwrap();
            session.set_verify(true);
            session.write_memory("flash", &image).unwrap();
            session.close().unwrap();
        }

        // Explicit baud rate
        {
            let programmer = ctx.locate_programmer("arduino").unwrap();
            let driver = driver_for(programmer, Some(115200)).unwrap();
            let mut session =
                ProgrammerSession::open_with_driver(&ctx, programmer, driver, port).unwrap();
            session.enable(part).unwrap();
            session.initialize(part).unwrap();

            let read = session.read_memory("flash").unwrap();
            assert_eq!(&read[..image.len()], image.as_slice());
            assert_eq!(session.state(), SessionState::Reading);
        }
    }
}
