use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use relay_timer::{
    CountdownTimer, ManualTrigger, TimerCallbacks, TimerConfig, TimerError, TimerStatus,
    ValidationError,
};

const SECOND: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq)]
enum Note {
    Start(f64),
    Tick(f64, f64),
    End(f64),
}

type Log = Arc<Mutex<Vec<Note>>>;

fn recording(log: &Log) -> TimerCallbacks {
    let (start, tick, end) = (Arc::clone(log), Arc::clone(log), Arc::clone(log));
    TimerCallbacks::new()
        .on_start(move |d| start.lock().unwrap().push(Note::Start(d)))
        .on_tick(move |d, r| tick.lock().unwrap().push(Note::Tick(d, r)))
        .on_end(move |d| end.lock().unwrap().push(Note::End(d)))
}

fn notes(log: &Log) -> Vec<Note> {
    log.lock().unwrap().clone()
}

#[test]
fn construction_sets_remaining_to_duration() {
    for duration in [0.0, 0.5, 5.0, 3600.0] {
        let timer = CountdownTimer::new(duration, ManualTrigger::new()).unwrap();
        assert_eq!(timer.remaining(), duration);
        assert_eq!(timer.duration(), duration);
        assert_eq!(timer.tick_interval(), 1.0);
        assert_eq!(timer.status(), TimerStatus::Stopped);
    }
}

#[test]
fn construction_rejects_invalid_parameters() {
    let negative = CountdownTimer::new(-1.0, ManualTrigger::new());
    assert!(matches!(
        negative,
        Err(TimerError::Validation(ValidationError::NegativeDuration { .. }))
    ));

    let zero_tick =
        CountdownTimer::with_config(TimerConfig::new(5.0).tick_interval(0.0), ManualTrigger::new());
    assert!(matches!(
        zero_tick,
        Err(TimerError::Validation(ValidationError::NonPositiveTickInterval { .. }))
    ));
}

#[test]
fn construction_rejects_unschedulable_tick_intervals() {
    for tick_interval in [1e20, 1e-10] {
        let config = TimerConfig::new(5.0).tick_interval(tick_interval);
        let result = CountdownTimer::with_config(config, ManualTrigger::new());
        assert!(matches!(
            result,
            Err(TimerError::Validation(ValidationError::UnschedulableTickInterval { .. }))
        ));
    }
}

#[test]
fn start_notifies_once_and_rejects_restart() {
    let log = Log::default();
    let trigger = ManualTrigger::new();
    let timer = CountdownTimer::new(5.0, trigger.clone()).unwrap();
    timer.configure(recording(&log));

    timer.start().unwrap();
    assert_eq!(timer.start(), Err(TimerError::AlreadyStarted));

    assert_eq!(notes(&log), vec![Note::Start(5.0)]);
    assert!(timer.is_running());
    assert_eq!(trigger.armed_count(), 1);
}

#[test]
fn five_ticks_count_down_and_end_before_last_tick() {
    let log = Log::default();
    let trigger = ManualTrigger::new();
    let timer = CountdownTimer::new(5.0, trigger.clone()).unwrap();
    timer.configure(recording(&log));
    timer.start().unwrap();

    let mut remaining = Vec::new();
    for _ in 0..5 {
        trigger.advance(SECOND);
        remaining.push(timer.remaining());
    }

    assert_eq!(remaining, vec![4.0, 3.0, 2.0, 1.0, 0.0]);
    assert_eq!(
        notes(&log),
        vec![
            Note::Start(5.0),
            Note::Tick(5.0, 4.0),
            Note::Tick(5.0, 3.0),
            Note::Tick(5.0, 2.0),
            Note::Tick(5.0, 1.0),
            Note::End(5.0),
            Note::Tick(5.0, 0.0),
        ]
    );
    assert!(!timer.is_running());
    assert_eq!(trigger.armed_count(), 0);

    // The disarmed trigger never fires again
    assert_eq!(trigger.advance(Duration::from_secs(10)), 0);
    assert_eq!(notes(&log).len(), 7);
}

#[test]
fn final_tick_observer_sees_stopped_timer() {
    let trigger = ManualTrigger::new();
    let timer = Arc::new(CountdownTimer::new(2.0, trigger.clone()).unwrap());
    let seen = Arc::new(Mutex::new(Vec::new()));

    let observer = Arc::downgrade(&timer);
    let record = Arc::clone(&seen);
    timer.set_tick_callback(move |_, remaining| {
        if let Some(timer) = observer.upgrade() {
            record.lock().unwrap().push((remaining, timer.is_running()));
        }
    });

    timer.start().unwrap();
    trigger.advance(Duration::from_secs(2));

    assert_eq!(*seen.lock().unwrap(), vec![(1.0, true), (0.0, false)]);
}

#[test]
fn end_on_never_started_timer_still_notifies() {
    let log = Log::default();
    let timer = CountdownTimer::new(7.0, ManualTrigger::new()).unwrap();
    timer.configure(recording(&log));

    timer.end();
    timer.end();

    assert_eq!(notes(&log), vec![Note::End(7.0), Note::End(7.0)]);
    assert_eq!(timer.status(), TimerStatus::Stopped);
}

#[test]
fn set_duration_resets_remaining_without_disarming() {
    let trigger = ManualTrigger::new();
    let timer = CountdownTimer::new(5.0, trigger.clone()).unwrap();
    timer.start().unwrap();
    trigger.advance(Duration::from_secs(3));
    assert_eq!(timer.remaining(), 2.0);

    timer.set_duration(10.0).unwrap();
    assert_eq!(timer.remaining(), 10.0);
    assert_eq!(timer.duration(), 10.0);
    assert!(timer.is_running());

    trigger.advance(SECOND);
    assert_eq!(timer.remaining(), 9.0);
}

#[test]
fn set_duration_rejects_negative_and_keeps_state() {
    let timer = CountdownTimer::new(5.0, ManualTrigger::new()).unwrap();
    assert!(timer.set_duration(-3.0).is_err());
    assert_eq!(timer.duration(), 5.0);
    assert_eq!(timer.remaining(), 5.0);
}

#[test]
fn auto_start_scenario() {
    let log = Log::default();
    let trigger = ManualTrigger::new();
    let config = TimerConfig::new(3.0)
        .tick_interval(1.0)
        .auto_start(true)
        .callbacks(recording(&log));
    let timer = CountdownTimer::with_config(config, trigger.clone()).unwrap();

    assert_eq!(notes(&log), vec![Note::Start(3.0)]);
    assert!(timer.is_running());

    trigger.advance(Duration::from_secs(3));

    assert_eq!(
        notes(&log),
        vec![
            Note::Start(3.0),
            Note::Tick(3.0, 2.0),
            Note::Tick(3.0, 1.0),
            Note::End(3.0),
            Note::Tick(3.0, 0.0),
        ]
    );
}

#[test]
fn uneven_tick_interval_clamps_to_zero() {
    let log = Log::default();
    let trigger = ManualTrigger::new();
    let config = TimerConfig::new(5.0)
        .tick_interval(2.0)
        .callbacks(recording(&log));
    let timer = CountdownTimer::with_config(config, trigger.clone()).unwrap();
    timer.start().unwrap();

    trigger.advance(Duration::from_secs(6));

    assert_eq!(timer.remaining(), 0.0);
    assert_eq!(
        notes(&log),
        vec![
            Note::Start(5.0),
            Note::Tick(5.0, 3.0),
            Note::Tick(5.0, 1.0),
            Note::End(5.0),
            Note::Tick(5.0, 0.0),
        ]
    );
}

#[test]
fn finished_timer_can_restart() {
    let log = Log::default();
    let trigger = ManualTrigger::new();
    let timer = CountdownTimer::new(1.0, trigger.clone()).unwrap();
    timer.configure(recording(&log));

    timer.start().unwrap();
    trigger.advance(SECOND);
    assert!(!timer.is_running());

    // Restarting as-is reuses remaining == 0: the next tick ends again
    timer.start().unwrap();
    trigger.advance(SECOND);
    assert_eq!(
        notes(&log)[3..].to_vec(),
        vec![Note::Start(1.0), Note::End(1.0), Note::Tick(1.0, 0.0)]
    );

    timer.set_duration(2.0).unwrap().start().unwrap();
    trigger.advance(SECOND);
    assert_eq!(timer.remaining(), 1.0);
    assert!(timer.is_running());
}

#[test]
fn end_while_running_disarms_trigger() {
    let log = Log::default();
    let trigger = ManualTrigger::new();
    let timer = CountdownTimer::new(10.0, trigger.clone()).unwrap();
    timer.configure(recording(&log));
    timer.start().unwrap();
    trigger.advance(SECOND);

    timer.end();
    trigger.advance(Duration::from_secs(20));

    assert_eq!(timer.remaining(), 9.0);
    assert_eq!(trigger.armed_count(), 0);
    assert_eq!(
        notes(&log),
        vec![Note::Start(10.0), Note::Tick(10.0, 9.0), Note::End(10.0)]
    );
}

#[test]
fn tick_observer_can_end_the_timer() {
    let trigger = ManualTrigger::new();
    let timer = Arc::new(CountdownTimer::new(10.0, trigger.clone()).unwrap());
    let observer = Arc::downgrade(&timer);

    timer.set_tick_callback(move |_, remaining| {
        if remaining <= 7.0 {
            if let Some(timer) = observer.upgrade() {
                timer.end();
            }
        }
    });
    timer.start().unwrap();
    trigger.advance(Duration::from_secs(10));

    assert_eq!(timer.remaining(), 7.0);
    assert!(!timer.is_running());
}

#[test]
fn callbacks_replaced_mid_run_apply_to_next_fire() {
    let trigger = ManualTrigger::new();
    let timer = CountdownTimer::new(5.0, trigger.clone()).unwrap();
    let first = Arc::new(Mutex::new(0));
    let second = Arc::new(Mutex::new(0));

    let counter = Arc::clone(&first);
    timer
        .set_tick_callback(move |_, _| *counter.lock().unwrap() += 1)
        .start()
        .unwrap();
    trigger.advance(Duration::from_secs(2));

    let counter = Arc::clone(&second);
    timer.set_tick_callback(move |_, _| *counter.lock().unwrap() += 1);
    trigger.advance(Duration::from_secs(2));

    assert_eq!(*first.lock().unwrap(), 2);
    assert_eq!(*second.lock().unwrap(), 2);
}

#[test]
fn dropping_running_timer_disarms_trigger() {
    let trigger = ManualTrigger::new();
    let ended = Arc::new(Mutex::new(false));
    let flag = Arc::clone(&ended);

    let timer = CountdownTimer::new(5.0, trigger.clone()).unwrap();
    timer.set_end_callback(move |_| *flag.lock().unwrap() = true);
    timer.start().unwrap();
    drop(timer);

    assert_eq!(trigger.armed_count(), 0);
    assert_eq!(trigger.advance(Duration::from_secs(10)), 0);
    assert!(!*ended.lock().unwrap());
}

#[test]
fn subscribers_see_every_state_change() {
    let trigger = ManualTrigger::new();
    let timer = CountdownTimer::new(2.0, trigger.clone()).unwrap();
    let mut updates = timer.subscribe();
    assert!(!updates.borrow_and_update().is_active);

    timer.start().unwrap();
    assert!(updates.has_changed().unwrap());
    assert_eq!(updates.borrow_and_update().time_remaining, Some(2.0));

    trigger.advance(SECOND);
    assert_eq!(updates.borrow_and_update().time_remaining, Some(1.0));

    trigger.advance(SECOND);
    let last = updates.borrow_and_update().clone();
    assert!(!last.is_active);
    assert_eq!(last.time_remaining, None);
}
