//! Event sources and subscription lifecycle.
//!
//! Every observer the shell attaches (terminal input pump, connectivity
//! watcher, demo reply stream) is a thread behind a `Subscription`
//! handle with an explicit `cancel`; nothing relies on the host cleaning
//! up implicitly. All sources feed one channel that the event loop
//! drains between frames, so state transitions stay single-threaded.

use crate::state::connectivity::{ConnectivityEvent, LinkState};
use std::net::{TcpStream, ToSocketAddrs};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// Events delivered to the event loop, from any source.
#[derive(Debug)]
pub enum AppEvent {
    /// A terminal input event (key, mouse, resize, paste).
    Input(crossterm::event::Event),
    /// A chunk of a streaming assistant reply.
    StreamChunk(String),
    /// The streaming assistant reply completed.
    ReplyDone,
    /// A reachability observation from the connectivity watcher.
    Connectivity(ConnectivityEvent),
}

/// Handle to a running observer thread.
///
/// Cancelling (or dropping) signals the thread to stop and joins it;
/// observer threads check the flag at least every poll interval, so the
/// join is bounded.
#[derive(Debug)]
pub struct Subscription {
    name: &'static str,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Spawn an observer thread under a fresh stop flag.
    pub fn spawn<F>(name: &'static str, body: F) -> Self
    where
        F: FnOnce(Arc<AtomicBool>) + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = std::thread::spawn(move || body(flag));
        Self {
            name,
            stop,
            handle: Some(handle),
        }
    }

    /// Stop the observer and wait for it to exit.
    pub fn cancel(self) {
        // Drop does the work; cancel exists to make teardown explicit
        // at call sites.
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!(observer = self.name, "observer thread panicked");
            }
        }
    }
}

/// How long the input pump waits per poll before re-checking its stop
/// flag.
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Spawn the terminal input pump.
///
/// Forwards every crossterm event into the channel; exits when cancelled
/// or when the receiving side goes away.
pub fn spawn_input_pump(tx: Sender<AppEvent>) -> Subscription {
    Subscription::spawn("input-pump", move |stop| {
        while !stop.load(Ordering::Relaxed) {
            match crossterm::event::poll(INPUT_POLL_INTERVAL) {
                Ok(true) => match crossterm::event::read() {
                    Ok(event) => {
                        if tx.send(AppEvent::Input(event)).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        tracing::warn!("terminal input read failed: {err}");
                        break;
                    }
                },
                Ok(false) => {}
                Err(err) => {
                    tracing::warn!("terminal input poll failed: {err}");
                    break;
                }
            }
        }
    })
}

/// Timeout for a single reachability probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// Granularity at which the watcher sleeps, so cancellation stays
/// responsive regardless of the probe interval.
const WATCHER_SLEEP_SLICE: Duration = Duration::from_millis(200);

/// One reachability probe: can the endpoint be reached over TCP right
/// now? An unresolvable address counts as offline.
pub fn probe_online(addr: &str) -> bool {
    let resolved = match addr.to_socket_addrs() {
        Ok(mut addrs) => addrs.next(),
        Err(_) => None,
    };
    match resolved {
        Some(addr) => TcpStream::connect_timeout(&addr, PROBE_TIMEOUT).is_ok(),
        None => false,
    }
}

/// Current link state as observed by one probe.
pub fn probe_link_state(addr: &str) -> LinkState {
    if probe_online(addr) {
        LinkState::Online
    } else {
        LinkState::Offline
    }
}

/// Spawn the connectivity watcher.
///
/// Probes `addr` every `interval` and reports transitions relative to
/// `initial`. Repeated observations of the same state are not sent; the
/// state machine would absorb them anyway.
pub fn spawn_connectivity_watcher(
    tx: Sender<AppEvent>,
    addr: String,
    interval: Duration,
    initial: LinkState,
) -> Subscription {
    Subscription::spawn("connectivity-watcher", move |stop| {
        let mut last = initial;
        while !stop.load(Ordering::Relaxed) {
            let observed = probe_link_state(&addr);
            if observed != last {
                last = observed;
                let event = match observed {
                    LinkState::Online => ConnectivityEvent::Online,
                    LinkState::Offline => ConnectivityEvent::Offline,
                };
                tracing::info!(?event, "connectivity transition observed");
                if tx.send(AppEvent::Connectivity(event)).is_err() {
                    break;
                }
            }

            let mut slept = Duration::ZERO;
            while slept < interval && !stop.load(Ordering::Relaxed) {
                std::thread::sleep(WATCHER_SLEEP_SLICE.min(interval - slept));
                slept += WATCHER_SLEEP_SLICE;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn cancel_stops_and_joins_the_observer() {
        let (tx, rx) = mpsc::channel::<u32>();
        let subscription = Subscription::spawn("test-observer", move |stop| {
            while !stop.load(Ordering::Relaxed) {
                std::thread::sleep(Duration::from_millis(5));
            }
            let _ = tx.send(42);
        });

        subscription.cancel();
        // The observer ran its shutdown path before cancel returned.
        assert_eq!(rx.try_recv(), Ok(42));
    }

    #[test]
    fn drop_cancels_implicitly() {
        let (tx, rx) = mpsc::channel::<&str>();
        {
            let _subscription = Subscription::spawn("scoped-observer", move |stop| {
                while !stop.load(Ordering::Relaxed) {
                    std::thread::sleep(Duration::from_millis(5));
                }
                let _ = tx.send("done");
            });
        }
        assert_eq!(rx.try_recv(), Ok("done"));
    }

    #[test]
    fn probe_reports_offline_for_unresolvable_address() {
        assert!(!probe_online("not an address"));
        assert_eq!(probe_link_state("not an address"), LinkState::Offline);
    }

    #[test]
    fn watcher_cancels_cleanly_without_a_transition() {
        let (tx, rx) = mpsc::channel();
        let subscription = spawn_connectivity_watcher(
            tx,
            "not an address".to_string(),
            Duration::from_secs(60),
            LinkState::Offline,
        );

        subscription.cancel();
        assert!(
            rx.try_recv().is_err(),
            "no transition: nothing should have been sent"
        );
    }
}
