use slist::List;

fn main() -> Result<(), slist::Error> {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let mut list = List::new(1);
  let head = list.head().ok_or(slist::Error::EmptyList)?;

  // Link two spawned nodes behind the head.
  //
  //   head          second        third
  //   +---+---+     +---+---+     +---+------+
  //   | 1 | o-----> | 2 | o-----> | 3 | None |
  //   +---+---+     +---+---+     +---+------+

  let second = list.link_after(head, list.spawn_node(2))?;
  let _ = list.link_after(second, list.spawn_node(3))?;

  let mut out = String::new();
  let _ = list.print(head, &mut out)?;

  let _ = list.push_front(7);
  let _ = list.get_tail()?;
  let _ = list.append(9)?;
  let _ = list.insert_after(second, 4)?;
  let _ = list.print(head, &mut out)?;

  let _ = list.delete(&7)?;
  let _ = list.delete(&9)?;
  let _ = list.delete(&4)?;

  if let Err(e) = list.delete(&4) {
    out.push_str(&format!("{}: 4\n", e));
  }

  let _ = list.append(7)?;
  let _ = list.print(head, &mut out)?;

  print!("{}", out);
  print!("{:?}\n", list);

  Ok(())
}
