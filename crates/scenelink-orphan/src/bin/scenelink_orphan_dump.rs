use std::{env, fs};

use scenelink_orphan::OrphanManager;

fn main() {
    tracing_subscriber::fmt::init();

    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: scenelink_orphan_dump <pull-index.json>");
        std::process::exit(2);
    };
    if args.next().is_some() {
        eprintln!("usage: scenelink_orphan_dump <pull-index.json>");
        std::process::exit(2);
    }

    let text = match fs::read_to_string(&path) {
        Ok(v) => v,
        Err(err) => {
            eprintln!("failed to read `{path}`: {err}");
            std::process::exit(2);
        }
    };

    match OrphanManager::deserialize(&text) {
        Ok(manager) => {
            let paths = manager.pulled_paths();
            println!("ok: {} pulled path(s)", paths.len());
            for pulled in &paths {
                let Some(record) = manager.record(pulled) else {
                    continue;
                };
                println!(
                    "  {} mirror={} ancestors={}",
                    pulled,
                    record.mirror(),
                    record.ancestor_config().descriptors().len()
                );
            }
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
