use queuing_event_sink::sink::{EventError, QueuingEventSink, SinkEvent};
use rand::Rng;
use std::sync::{Arc, Mutex};

/// Drives a sink with a random mix of producer calls, attaches and detaches,
/// and checks that the concatenation of everything every delegate observed is
/// exactly the produced sequence.
#[test]
fn random_attach_detach_preserves_order_and_loses_nothing() {
    let mut rng = rand::rng();

    for _ in 0..50 {
        let observed: Arc<Mutex<Vec<SinkEvent<u32>>>> = Arc::new(Mutex::new(Vec::new()));
        let mut produced = Vec::new();
        let mut sink = QueuingEventSink::new();

        for seq in 0..200u32 {
            match rng.random_range(0..10) {
                0 => {
                    let observed = Arc::clone(&observed);
                    sink.attach(move |event| observed.lock().unwrap().push(event));
                }
                1 => {
                    sink.detach();
                }
                2 => {
                    sink.error(format!("E{}", seq), None, Some(seq));
                    produced.push(SinkEvent::Error(EventError {
                        code: format!("E{}", seq),
                        message: None,
                        details: Some(seq),
                    }));
                }
                _ => {
                    sink.success(seq);
                    produced.push(SinkEvent::Success { payload: seq });
                }
            }

            if sink.is_attached() {
                assert_eq!(sink.pending_len(), 0);
            }
        }

        sink.end_of_stream();
        produced.push(SinkEvent::EndOfStream);

        // Final listener collects whatever is left
        let tail = Arc::clone(&observed);
        sink.attach(move |event| tail.lock().unwrap().push(event));

        assert_eq!(*observed.lock().unwrap(), produced);
    }
}
