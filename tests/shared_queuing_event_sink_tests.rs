use queuing_event_sink::sink::{SharedQueuingEventSink, SinkEvent, SinkState};
use std::sync::{Arc, Mutex};
use std::thread;

#[test]
fn clones_share_the_same_queue() {
    let producer: SharedQueuingEventSink<u32> = SharedQueuingEventSink::new();
    let transport = producer.clone();

    producer.success(1);
    producer.success(2);
    assert_eq!(transport.pending_len(), 2);
    assert_eq!(producer.sink_id(), transport.sink_id());

    let received = Arc::new(Mutex::new(Vec::new()));
    transport.attach({
        let received = Arc::clone(&received);
        move |event| received.lock().unwrap().push(event)
    });

    assert_eq!(producer.state(), SinkState::Attached);
    assert_eq!(
        *received.lock().unwrap(),
        vec![
            SinkEvent::Success { payload: 1 },
            SinkEvent::Success { payload: 2 },
        ]
    );
}

#[test]
fn concurrent_producers_keep_per_thread_order() {
    const THREADS: u32 = 4;
    const EVENTS_PER_THREAD: u32 = 250;

    let sink: SharedQueuingEventSink<(u32, u32)> = SharedQueuingEventSink::with_capacity(16);
    let received = Arc::new(Mutex::new(Vec::new()));

    let handles: Vec<_> = (0..THREADS)
        .map(|thread_id| {
            let sink = sink.clone();
            thread::spawn(move || {
                for seq in 0..EVENTS_PER_THREAD {
                    sink.success((thread_id, seq));
                }
            })
        })
        .collect();

    // Attach while producers may still be running; events split between
    // backlog replay and live delivery.
    sink.attach({
        let received = Arc::clone(&received);
        move |event| received.lock().unwrap().push(event)
    });

    for handle in handles {
        handle.join().expect("producer thread panicked");
    }

    let received = received.lock().unwrap();
    assert_eq!(received.len(), (THREADS * EVENTS_PER_THREAD) as usize);

    let mut next_expected = vec![0u32; THREADS as usize];
    for event in received.iter() {
        match event {
            SinkEvent::Success {
                payload: (thread_id, seq),
            } => {
                assert_eq!(*seq, next_expected[*thread_id as usize]);
                next_expected[*thread_id as usize] += 1;
            }
            other => panic!("Unexpected event: {:?}", other),
        }
    }
    assert_eq!(sink.pending_len(), 0);
}

#[test]
fn with_sink_exposes_inner_sink() {
    let sink: SharedQueuingEventSink<&'static str> = SharedQueuingEventSink::default();
    sink.success("a");

    let (pending, closed) = sink.with_sink(|inner| {
        inner.end_of_stream();
        (inner.pending_len(), inner.is_closed())
    });

    assert_eq!(pending, 2);
    assert!(closed);
    assert!(sink.is_closed());
}

fn failing_delegate(_event: SinkEvent<u32>) {
    panic!("delegate failure");
}

#[test]
fn recovers_after_a_panicking_delegate() {
    let sink: SharedQueuingEventSink<u32> = SharedQueuingEventSink::new();
    sink.attach(failing_delegate);

    let worker = {
        let sink = sink.clone();
        thread::spawn(move || sink.success(1))
    };
    assert!(worker.join().is_err());

    // The lock is poisoned now; the handle still works
    assert!(sink.detach().is_some());
    sink.success(2);
    assert_eq!(sink.pending_len(), 1);
    assert!(!sink.is_attached());
}

#[test]
fn panicking_delegate_during_replay_keeps_remaining_backlog() {
    let sink: SharedQueuingEventSink<u32> = SharedQueuingEventSink::new();
    for n in 0..5 {
        sink.success(n);
    }

    let worker = {
        let sink = sink.clone();
        thread::spawn(move || {
            sink.attach(|event: SinkEvent<u32>| {
                if event == (SinkEvent::Success { payload: 1 }) {
                    panic!("delegate failure on 1");
                }
            });
        })
    };
    assert!(worker.join().is_err());

    // 0 was delivered, 1 was in flight when the delegate panicked
    assert_eq!(sink.pending_len(), 3);
    assert!(sink.detach().is_some());

    let received = Arc::new(Mutex::new(Vec::new()));
    sink.attach({
        let received = Arc::clone(&received);
        move |event| received.lock().unwrap().push(event)
    });

    assert_eq!(
        *received.lock().unwrap(),
        vec![
            SinkEvent::Success { payload: 2 },
            SinkEvent::Success { payload: 3 },
            SinkEvent::Success { payload: 4 },
        ]
    );
    assert_eq!(sink.pending_len(), 0);
}
