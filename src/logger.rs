//! A minimal `log` backend that writes every enabled record to stderr.

pub struct Logger;

impl log::Log for Logger {
  fn enabled(&self, metadata: &log::Metadata) -> bool {
    log::max_level() >= metadata.level()
  }

  fn log(&self, record: &log::Record) {
    if self.enabled(record.metadata()) {
      eprintln!("[{}] {}", record.level(), record.args())
    }
  }

  fn flush(&self) {}
}

/// Maps the number of `-v` flags to a level filter, starting from warnings.
pub fn level_for_verbosity(verbosity: u64) -> log::LevelFilter {
  match verbosity {
    0 => log::LevelFilter::Warn,
    1 => log::LevelFilter::Info,
    2 => log::LevelFilter::Debug,
    _ => log::LevelFilter::Trace,
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn verbosity_levels(){
    assert_eq!(level_for_verbosity(0), log::LevelFilter::Warn);
    assert_eq!(level_for_verbosity(2), log::LevelFilter::Debug);
    assert_eq!(level_for_verbosity(9), log::LevelFilter::Trace);
  }
}
