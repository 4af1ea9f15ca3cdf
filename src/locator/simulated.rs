/// Scriptable location provider
///
/// Stands in for the device: you decide the permission state, what the user
/// answers when asked, and which fixes show up. The CLI drives the locator
/// with it, and so do the tests.

use crate::geo::{Coordinate, LocationFix};
use crate::locator::provider::{
    AuthorizationStatus, LocationError, LocationEvent, LocationEventSender, LocationProvider,
};
use std::sync::{Mutex, MutexGuard};
use tracing::trace;

#[derive(Debug)]
struct Inner {
    status: AuthorizationStatus,
    services_enabled: bool,
    // What the "user" picks when the permission prompt shows up
    answer: Option<AuthorizationStatus>,
    // Sent right after start_updates, like a device reporting its first fix
    first_fix: Option<LocationFix>,
    subscribers: Vec<LocationEventSender>,
    permission_requests: usize,
    start_updates_calls: usize,
}

/// In-process LocationProvider with knobs
#[derive(Debug)]
pub struct SimulatedLocationProvider {
    inner: Mutex<Inner>,
}

impl SimulatedLocationProvider {
    pub fn new(status: AuthorizationStatus) -> Self {
        Self {
            inner: Mutex::new(Inner {
                status,
                services_enabled: true,
                answer: None,
                first_fix: None,
                subscribers: Vec::new(),
                permission_requests: 0,
                start_updates_calls: 0,
            }),
        }
    }

    /// Already-authorized provider that reports `coordinate` once updates start
    pub fn authorized_at(coordinate: Coordinate) -> Self {
        Self::new(AuthorizationStatus::AuthorizedWhenInUse).with_first_fix(LocationFix::now(coordinate))
    }

    pub fn with_services_enabled(self, enabled: bool) -> Self {
        self.lock().services_enabled = enabled;
        self
    }

    /// Status the provider switches to when permission is requested
    pub fn answering_with(self, answer: AuthorizationStatus) -> Self {
        self.lock().answer = Some(answer);
        self
    }

    pub fn with_first_fix(self, fix: LocationFix) -> Self {
        self.lock().first_fix = Some(fix);
        self
    }

    /// Change the permission (e.g. user flipped it in Settings) and tell
    /// subscribers
    pub fn set_authorization(&self, status: AuthorizationStatus) {
        self.lock().status = status;
        self.emit(LocationEvent::AuthorizationChanged(status));
    }

    pub fn push_fix(&self, fix: LocationFix) {
        self.emit(LocationEvent::LocationsUpdated(vec![fix]));
    }

    pub fn push_location(&self, coordinate: Coordinate) {
        self.push_fix(LocationFix::now(coordinate));
    }

    pub fn push_error(&self, error: LocationError) {
        self.emit(LocationEvent::Failed(error));
    }

    pub fn permission_requests(&self) -> usize {
        self.lock().permission_requests
    }

    pub fn start_updates_calls(&self) -> usize {
        self.lock().start_updates_calls
    }

    fn emit(&self, event: LocationEvent) {
        trace!(?event, "simulated location event");

        // Drop subscribers whose receiving side went away
        self.lock()
            .subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Nothing in here can be left half-updated, so a poisoned lock is fine to reuse
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LocationProvider for SimulatedLocationProvider {
    fn authorization_status(&self) -> AuthorizationStatus {
        self.lock().status
    }

    fn location_services_enabled(&self) -> bool {
        self.lock().services_enabled
    }

    fn request_permission(&self) {
        let answer = {
            let mut inner = self.lock();
            inner.permission_requests += 1;
            inner.answer
        };

        if let Some(status) = answer {
            self.set_authorization(status);
        }
    }

    fn start_updates(&self) {
        let first_fix = {
            let mut inner = self.lock();
            inner.start_updates_calls += 1;
            inner.first_fix.clone()
        };

        if let Some(fix) = first_fix {
            self.push_fix(fix);
        }
    }

    fn subscribe(&self, events: LocationEventSender) {
        self.lock().subscribers.push(events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_request_permission_answers() {
        let provider = SimulatedLocationProvider::new(AuthorizationStatus::NotDetermined)
            .answering_with(AuthorizationStatus::Denied);
        let (tx, mut rx) = mpsc::unbounded_channel();
        provider.subscribe(tx);

        provider.request_permission();

        assert_eq!(provider.permission_requests(), 1);
        assert_eq!(provider.authorization_status(), AuthorizationStatus::Denied);
        assert_eq!(
            rx.try_recv().unwrap(),
            LocationEvent::AuthorizationChanged(AuthorizationStatus::Denied)
        );
    }

    #[test]
    fn test_start_updates_sends_first_fix() {
        let here = Coordinate::new(37.0, -122.0);
        let provider = SimulatedLocationProvider::authorized_at(here);
        let (tx, mut rx) = mpsc::unbounded_channel();
        provider.subscribe(tx);

        provider.start_updates();

        assert_eq!(provider.start_updates_calls(), 1);
        match rx.try_recv().unwrap() {
            LocationEvent::LocationsUpdated(fixes) => {
                assert_eq!(fixes.len(), 1);
                assert_eq!(fixes[0].coordinate, here);
            }
            other => panic!("Expected LocationsUpdated, got {:?}", other),
        }
    }

    #[test]
    fn test_closed_subscribers_are_dropped() {
        let provider = SimulatedLocationProvider::new(AuthorizationStatus::AuthorizedAlways);
        let (tx, rx) = mpsc::unbounded_channel();
        provider.subscribe(tx);
        drop(rx);

        provider.push_location(Coordinate::new(0.0, 0.0));

        assert!(provider.lock().subscribers.is_empty());
    }
}
