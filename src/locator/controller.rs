/// Store locator controller
///
/// One tokio task owns the locator state. UI commands, location events and
/// search completions all come in as messages and get applied one at a time,
/// no matter which thread they were sent from. Every change is published on
/// a watch channel for renderers.
///
/// Searches run on their own tasks. Nothing is cancelled: if a new fix lands
/// while a search is out, a second search starts and whichever answer
/// arrives last is what's shown.

use crate::config::LocatorConfig;
use crate::error::{PantryError, Result};
use crate::geo::{Coordinate, LocationFix, Viewport};
use crate::locator::places::{Place, PlacesSearch, SearchError, SearchRequest};
use crate::locator::provider::{AuthorizationStatus, LocationError, LocationEvent, LocationProvider};
use crate::locator::state::{LocatorState, StoreResult};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Shown when permission was already refused before we asked
const ENABLE_IN_SETTINGS: &str = "Please enable location access in Settings to find nearby stores.";
const NOT_AUTHORIZED: &str = "Location access not authorized";

/// Commands a renderer can send
#[derive(Debug)]
enum Command {
    RequestPermission,
}

/// A finished search, reported back to the controller task
#[derive(Debug)]
struct SearchCompletion {
    seq: u64,
    origin: Coordinate,
    outcome: std::result::Result<Option<Vec<Place>>, SearchError>,
}

/// Handle to a running store locator.
///
/// Dropping the handle stops the controller task. In-flight searches finish
/// on their own and their results are thrown away.
pub struct StoreLocator {
    commands: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<LocatorState>,
    task: JoinHandle<()>,
}

impl StoreLocator {
    /// Subscribe to `location` and start the controller task.
    ///
    /// Must be called from inside a tokio runtime.
    pub fn spawn(
        config: LocatorConfig,
        location: Arc<dyn LocationProvider>,
        places: Arc<dyn PlacesSearch>,
    ) -> Self {
        let initial = LocatorState::new(Viewport::new(config.default_center, config.default_span));
        let (publisher, state) = watch::channel(initial.clone());

        let (commands, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (completions, completion_rx) = mpsc::unbounded_channel();

        location.subscribe(event_tx);

        let controller = Controller {
            config,
            location,
            places,
            state: initial,
            publisher,
            completions,
            search_seq: 0,
        };

        let task = tokio::spawn(controller.run(command_rx, event_rx, completion_rx));

        Self {
            commands,
            state,
            task,
        }
    }

    /// Ask for location permission, or start updates if we already have it.
    /// This is the only command a renderer issues, typically on first display.
    pub fn request_permission(&self) {
        if self.commands.send(Command::RequestPermission).is_err() {
            warn!("store locator stopped, permission request dropped");
        }
    }

    /// Current snapshot
    pub fn state(&self) -> LocatorState {
        self.state.borrow().clone()
    }

    /// Receiver that wakes on every state change
    pub fn subscribe(&self) -> watch::Receiver<LocatorState> {
        self.state.clone()
    }

    /// Wait until the published state satisfies `predicate` and return it
    pub async fn wait_for<F>(&self, predicate: F) -> Result<LocatorState>
    where
        F: FnMut(&LocatorState) -> bool,
    {
        let mut receiver = self.state.clone();
        let state = receiver
            .wait_for(predicate)
            .await
            .map_err(|_| PantryError::LocatorStopped)?;

        Ok(state.clone())
    }

    /// Stop the controller and wait for it to exit
    pub async fn shutdown(self) {
        let StoreLocator { commands, task, .. } = self;
        drop(commands);

        if let Err(e) = task.await {
            warn!("store locator task ended abnormally: {}", e);
        }
    }
}

/// The state-owning side. Lives on its own task.
struct Controller {
    config: LocatorConfig,
    location: Arc<dyn LocationProvider>,
    places: Arc<dyn PlacesSearch>,
    state: LocatorState,
    publisher: watch::Sender<LocatorState>,
    completions: mpsc::UnboundedSender<SearchCompletion>,
    search_seq: u64,
}

impl Controller {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut events: mpsc::UnboundedReceiver<LocationEvent>,
        mut completions: mpsc::UnboundedReceiver<SearchCompletion>,
    ) {
        let mut events_open = true;

        loop {
            // Commands first, then device events, then search results
            tokio::select! {
                biased;

                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                event = events.recv(), if events_open => match event {
                    Some(event) => self.handle_event(event),
                    None => {
                        debug!("location provider went away");
                        events_open = false;
                    }
                },
                // We hold a sender ourselves, so this never yields None
                Some(completion) = completions.recv() => self.handle_completion(completion),
            }

            self.publish();
        }

        debug!("store locator stopped");
    }

    fn publish(&self) {
        let next = &self.state;
        self.publisher.send_if_modified(|current| {
            if *current == *next {
                false
            } else {
                *current = next.clone();
                true
            }
        });
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::RequestPermission => self.request_permission(),
        }
    }

    fn handle_event(&mut self, event: LocationEvent) {
        match event {
            LocationEvent::AuthorizationChanged(status) => self.authorization_changed(status),
            LocationEvent::LocationsUpdated(fixes) => self.locations_updated(fixes),
            LocationEvent::Failed(error) => self.location_failed(error),
        }
    }

    fn request_permission(&mut self) {
        let status = self.location.authorization_status();
        debug!(%status, "permission requested");

        match status {
            AuthorizationStatus::NotDetermined => self.location.request_permission(),
            AuthorizationStatus::AuthorizedWhenInUse | AuthorizationStatus::AuthorizedAlways => {
                self.start_updates()
            }
            status if status.is_denied() => {
                self.state.error_message = Some(ENABLE_IN_SETTINGS.to_string());
            }
            // Newer platform states: leave them alone
            _ => {}
        }
    }

    fn start_updates(&mut self) {
        if !self.location.authorization_status().is_granted() {
            self.state.error_message = Some(NOT_AUTHORIZED.to_string());
            return;
        }

        if !self.location.location_services_enabled() {
            self.state.error_message = Some(PantryError::LocationServiceDisabled.user_message());
            return;
        }

        debug!("starting location updates");
        self.location.start_updates();
    }

    fn authorization_changed(&mut self, status: AuthorizationStatus) {
        debug!(%status, "authorization changed");
        self.state.authorization_status = Some(status);

        match status {
            AuthorizationStatus::AuthorizedWhenInUse | AuthorizationStatus::AuthorizedAlways => {
                self.start_updates()
            }
            status if status.is_denied() => {
                self.state.error_message = Some(PantryError::PermissionDenied.user_message());
            }
            AuthorizationStatus::NotDetermined => self.location.request_permission(),
            _ => {}
        }
    }

    fn locations_updated(&mut self, fixes: Vec<LocationFix>) {
        let Some(fix) = fixes.into_iter().last() else {
            return;
        };

        debug!(location = %fix.coordinate, accuracy = fix.horizontal_accuracy, "location updated");

        self.state.viewport = Viewport::new(fix.coordinate, self.config.default_span);
        self.state.user_location = Some(fix);
        self.search_nearby_stores();
    }

    fn location_failed(&mut self, error: LocationError) {
        warn!("location error: {}", error);

        let message = match error {
            LocationError::Denied => PantryError::PermissionDenied.user_message(),
            LocationError::LocationUnknown => PantryError::LocationUnavailable.user_message(),
            LocationError::Other(reason) => format!("Location error: {}", reason),
        };
        self.state.error_message = Some(message);
    }

    fn search_nearby_stores(&mut self) {
        let Some(origin) = self.state.user_location.as_ref().map(|fix| fix.coordinate) else {
            return;
        };

        self.state.is_loading = true;
        self.state.error_message = None;

        self.search_seq += 1;
        let seq = self.search_seq;
        let request = SearchRequest::new(
            self.config.search_query.clone(),
            origin,
            self.config.search_region_meters,
        );

        info!(seq, %origin, query = %request.query, "searching for nearby stores");

        let places = Arc::clone(&self.places);
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let outcome = places.search(request).await;
            // Controller may be gone by now; nobody left to tell
            let _ = completions.send(SearchCompletion {
                seq,
                origin,
                outcome,
            });
        });
    }

    fn handle_completion(&mut self, completion: SearchCompletion) {
        let SearchCompletion {
            seq,
            origin,
            outcome,
        } = completion;

        if seq < self.search_seq {
            debug!(seq, latest = self.search_seq, "older search finished after a newer one started");
        }

        self.state.is_loading = false;

        let places = match outcome {
            Err(e) => {
                warn!(seq, "store search failed: {}", e);
                self.state.error_message = Some(PantryError::from(e).user_message());
                return;
            }
            Ok(None) => Vec::new(),
            Ok(Some(places)) => places,
        };

        if places.is_empty() {
            info!(seq, "no stores found");
            self.state.error_message = Some(PantryError::NoResults.user_message());
            return;
        }

        let stores: Vec<StoreResult> = places
            .into_iter()
            .map(|place| StoreResult::from_place(place, &origin))
            .collect();

        info!(seq, count = stores.len(), "stores found");

        // Results and viewport change together
        let mut points: Vec<Coordinate> = stores.iter().map(|store| store.coordinate).collect();
        points.push(origin);
        if let Some(viewport) = Viewport::fitting(&points, self.config.fit_multiplier) {
            self.state.viewport = viewport;
        }
        self.state.stores = stores;
    }
}
