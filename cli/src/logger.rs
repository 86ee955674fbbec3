use log::{Level, LevelFilter, Log, Metadata, Record};

/// Plain stderr logger; records already carry their `[scope]` tag.
struct StderrLogger {
    level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool { metadata.level() <= self.level }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) { return }
        match record.level() {
            Level::Error => eprintln!("error: {}", record.args()),
            Level::Warn => eprintln!("warning: {}", record.args()),
            _ => eprintln!("{}", record.args()),
        }
    }

    fn flush(&self) {}
}

/// Map `-v` occurrences to a level: warnings by default, then info, debug, trace.
fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub fn init(verbose: u8) -> anyhow::Result<()> {
    let level = level_for(verbose);
    log::set_boxed_logger(Box::new(StderrLogger { level }))
        .map_err(|e| anyhow::anyhow!("[cli] failed to install logger: {e}"))?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(level_for(0), LevelFilter::Warn);
        assert_eq!(level_for(1), LevelFilter::Info);
        assert_eq!(level_for(2), LevelFilter::Debug);
        assert_eq!(level_for(9), LevelFilter::Trace);
    }
}
