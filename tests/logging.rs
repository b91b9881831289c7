use std::sync::Mutex;
use log::Level;
use log::LevelFilter;
use log::Log;
use log::Metadata;
use log::Record;
use slist::List;

struct Capture(Mutex<Vec<(Level, String)>>);

impl Log for Capture {
  fn enabled(&self, metadata: &Metadata<'_>) -> bool {
    metadata.target().starts_with("slist")
  }

  fn log(&self, record: &Record<'_>) {
    if self.enabled(record.metadata()) {
      let mut records = self.0.lock().unwrap();
      records.push((record.level(), record.args().to_string()));
    }
  }

  fn flush(&self) {}
}

static CAPTURE: Capture = Capture(Mutex::new(Vec::new()));

fn drain() -> Vec<(Level, String)> {
  std::mem::take(&mut *CAPTURE.0.lock().unwrap())
}

// Everything lives in one test since the logger is process-wide.

#[test]
fn test_mutations_are_logged() {
  log::set_logger(&CAPTURE).unwrap();
  log::set_max_level(LevelFilter::Info);

  let mut list = List::new(1_u64);
  let head = list.head().unwrap();
  assert!(drain().is_empty());

  let _ = list.push_front(7);
  assert!(drain() == [(Level::Info, String::from("pushing 7"))]);

  let _ = list.append(9).unwrap();
  assert!(drain() == [(Level::Info, String::from("pushing 9 at the end of the list"))]);

  let _ = list.append(10).unwrap();
  assert!(drain() == [(Level::Info, String::from("pushing 10 at the end of the list"))]);

  let _ = list.insert_after(head, 4).unwrap();
  assert!(drain() == [(Level::Info, String::from("pushing 4 next to 1"))]);

  let _ = list.delete(&4).unwrap();
  assert!(drain() == [(Level::Info, String::from("deleting 4"))]);

  assert!(list.delete(&4).is_err());
  assert!(drain() == [(Level::Warn, String::from("error while deleting, value not found: 4"))]);

  let _ = list.print(head, &mut String::new()).unwrap();
  let _ = list.get_tail().unwrap();
  let _ = format!("{:?}", list);
  assert!(drain().is_empty());
}
