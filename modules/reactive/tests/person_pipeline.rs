use std::{
  sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
    mpsc,
  },
  time::{Duration, Instant},
};

use fraktor_reactive_rs::{SchedulerConfig, SequenceStream, TimerScheduler, UnitStream};

const WAIT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
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

#[derive(Debug, Clone, PartialEq, Eq)]
struct PersonCommand {
  person: Person,
}

impl PersonCommand {
  fn say_my_name(&self) -> String {
    self.person.say_my_name()
  }
}

fn michael() -> Person {
  Person::new("Michael", "Weston")
}

fn cast() -> Vec<Person> {
  vec![michael(), Person::new("Fiona", "Glenanne"), Person::new("Sam", "Axe"), Person::new("Jesse", "Porter")]
}

fn scheduler() -> TimerScheduler {
  TimerScheduler::new(SchedulerConfig::new().with_thread_name("person-pipeline")).expect("scheduler")
}

#[test]
fn unit_of_person_blocks_to_the_person() {
  let person = UnitStream::of(michael()).block().expect("run").expect("value");
  assert_eq!(person.say_my_name(), "My name is :Michael Weston");
}

#[test]
fn unit_transform_to_command() {
  let command = UnitStream::of(michael()).map(|person| PersonCommand { person }).block().expect("run");
  assert_eq!(command.map(|c| c.say_my_name()), Some(String::from("My name is :Michael Weston")));
}

#[test]
fn unit_filter_without_match_is_empty() {
  let outcome = UnitStream::of(michael()).filter(|person| person.first_name == "foo").block();
  assert_eq!(outcome, Ok(None));
}

#[test]
fn sequence_subscribe_greets_everyone_in_order() {
  let greetings = Arc::new(Mutex::new(Vec::new()));
  let sink = greetings.clone();
  SequenceStream::of_sequence(cast())
    .subscribe(move |person| sink.lock().expect("greetings").push(person.say_my_name()));

  assert_eq!(*greetings.lock().expect("greetings"), vec![
    "My name is :Michael Weston",
    "My name is :Fiona Glenanne",
    "My name is :Sam Axe",
    "My name is :Jesse Porter",
  ]);
}

#[test]
fn sequence_filter_selects_fiona() {
  let names = SequenceStream::of_sequence(cast())
    .filter(|person| person.first_name == "Fiona")
    .map(|person| person.say_my_name())
    .block_all();
  assert_eq!(names, Ok(vec![String::from("My name is :Fiona Glenanne")]));
}

#[test]
fn delayed_sequence_completes_after_every_greeting() {
  let scheduler = scheduler();
  let delay = Duration::from_millis(25);
  let (tx, rx) = mpsc::channel();
  let (greet_tx, done_tx) = (tx.clone(), tx);
  let started = Instant::now();

  SequenceStream::of_sequence(cast())
    .delay_elements_on(delay, &scheduler)
    .on_complete(move || done_tx.send(None).expect("send"))
    .subscribe(move |person| greet_tx.send(Some(person.say_my_name())).expect("send"));

  let mut greeted = Vec::new();
  while let Some(greeting) = rx.recv_timeout(WAIT).expect("signal") {
    greeted.push(greeting);
  }
  assert_eq!(greeted.len(), 4);
  assert!(started.elapsed() >= delay * 4);
}

#[test]
fn delay_then_filter_keeps_names_containing_i() {
  let scheduler = scheduler();
  let hook_calls = Arc::new(AtomicUsize::new(0));
  let counter = hook_calls.clone();
  let names = SequenceStream::of_sequence(cast())
    .delay_elements_on(Duration::from_millis(10), &scheduler)
    .filter(|person| person.first_name.contains('i'))
    .on_complete(move || {
      counter.fetch_add(1, Ordering::SeqCst);
    })
    .map(|person| person.first_name)
    .block_all();

  assert_eq!(names, Ok(vec![String::from("Michael"), String::from("Fiona")]));
  assert_eq!(hook_calls.load(Ordering::SeqCst), 1);
}
