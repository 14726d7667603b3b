//! Walks a small cast of people through unit and sequence pipelines.
//!
//! Run with `RUST_LOG=debug` to see the subscription and scheduler lifecycle.

use std::{sync::mpsc, time::Duration};

use fraktor_reactive_rs::{SequenceStream, StreamError, UnitStream};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
struct Person {
  first_name: String,
  last_name:  String,
}

impl Person {
  fn new(first_name: &str, last_name: &str) -> Self {
    Self { first_name: first_name.into(), last_name: last_name.into() }
  }

  fn say_my_name(&self) -> String {
    format!("My name is :{} {}", self.first_name, self.last_name)
  }
}

#[derive(Debug, Clone)]
struct PersonCommand {
  person: Person,
}

impl PersonCommand {
  fn say_my_name(&self) -> String {
    self.person.say_my_name()
  }
}

fn main() -> Result<(), StreamError> {
  tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

  let michael = Person::new("Michael", "Weston");
  let cast = vec![
    michael.clone(),
    Person::new("Fiona", "Glenanne"),
    Person::new("Sam", "Axe"),
    Person::new("Jesse", "Porter"),
  ];

  if let Some(person) = UnitStream::of(michael.clone()).block()? {
    info!("{}", person.say_my_name());
  }
  if let Some(command) = UnitStream::of(michael.clone()).map(|person| PersonCommand { person }).block()? {
    info!("command: {}", command.say_my_name());
  }
  let nobody = UnitStream::of(michael).filter(|person| person.first_name == "foo").block()?;
  info!(found = nobody.is_some(), "filtered unit stream");

  let people = SequenceStream::of_sequence(cast);
  people.subscribe(|person| info!("{}", person.say_my_name()));
  people.filter(|person| person.first_name == "Fiona").subscribe(|person| info!("filtered: {}", person.say_my_name()));

  let (done_tx, done_rx) = mpsc::channel();
  people
    .delay_elements(Duration::from_millis(500))
    .filter(|person| person.first_name.contains('i'))
    .on_complete(move || {
      let _ = done_tx.send(());
    })
    .subscribe(|person| info!("delayed: {}", person.say_my_name()));

  if done_rx.recv_timeout(Duration::from_secs(10)).is_err() {
    info!("delayed pipeline did not finish in time");
  }
  Ok(())
}
