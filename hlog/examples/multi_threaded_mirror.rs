use std::sync::Arc;

use hlog::{DebugGate, Flags, MirrorMode, info, logger_config};

fn main() {
    let path = "/tmp/hlog_example_mirror.log";
    let _ = std::fs::remove_file(path);

    // default logger: stderr plus the shared mirror file
    hlog::set_flags(Flags::STD | Flags::MICROSECONDS | Flags::SHORT_FILE);
    hlog::set_debug_gate(DebugGate::On);
    hlog::set_mirror_path(Some(path));
    info!("Hello, world!");
    hlog::debug!("debug lines are on");

    // worker loggers write to stdout and, through the shared slot, to the same file
    let worker = Arc::new(
        logger_config()
            .with_stdout()
            .with_prefix("[worker] ")
            .with_flags(Flags::TIME | Flags::SHORT_FILE)
            .with_mirror_mode(MirrorMode::Persistent)
            .build(),
    );
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let worker = Arc::clone(&worker);
            std::thread::spawn(move || {
                worker.output(&format!("thread {i} started")).unwrap();
                hlog::warn!(logger = worker; "thread ", i, " done");
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    hlog::set_mirror_path(None::<&str>);
    println!("\n--- {path} ---");
    print!("{}", std::fs::read_to_string(path).unwrap());
}
