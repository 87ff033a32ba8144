use crate::events::{FailureKind, SearchFailure, Severity};
use placepick::search::{SearchOutcome, SearchRequest, clamp_radius};
use placepick::spin::SpinError;
use placepick::{PlaceId, Selection, SpinPlan};
use rand::Rng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub severity: Severity,
    pub message: String,
}

impl Alert {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

impl From<&SearchFailure> for Alert {
    fn from(failure: &SearchFailure) -> Self {
        Self {
            severity: failure.severity(),
            message: failure.message.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinResult {
    pub name: String,
    pub directions: Option<String>,
}

/// Whether the restaurant list and the wheel need rebuilding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Redraw {
    Needed,
    Skip,
}

/// Everything the window shows, minus the widgets.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub selection: Selection,
    pub keyword: String,
    pub radius: u32,
    pub searching: bool,
    pub spinning: bool,
    pub alert: Option<Alert>,
    pub result: Option<SpinResult>,
}

impl AppState {
    pub fn new(keyword: impl Into<String>, radius: u32) -> Self {
        Self {
            keyword: keyword.into(),
            radius: clamp_radius(radius),
            ..Self::default()
        }
    }

    pub fn set_radius(&mut self, value: f64) {
        self.radius = clamp_radius(value.round() as u32);
    }

    pub fn can_search(&self) -> bool {
        !self.searching && !self.spinning
    }

    pub fn can_spin(&self) -> bool {
        self.selection.can_spin() && !self.spinning && !self.searching
    }

    /// Marks a search as in flight. `None` while one is already running or the
    /// wheel is turning.
    pub fn begin_search(&mut self) -> Option<SearchRequest> {
        if !self.can_search() {
            return None;
        }
        self.searching = true;
        self.alert = None;
        Some(SearchRequest::new(self.keyword.clone(), self.radius))
    }

    pub fn finish_search(&mut self, outcome: SearchOutcome) -> Redraw {
        self.searching = false;
        log::info!(
            "Showing {} of {} places, {} on the wheel",
            outcome.restaurants.len(),
            outcome.raw_count,
            outcome.restaurants.iter().filter(|r| r.selected).count()
        );
        self.selection.replace(outcome.restaurants);
        Redraw::Needed
    }

    /// A location failure leaves the previous results alone. Anything else
    /// empties the list and puts the draft wheel back.
    pub fn fail_search(&mut self, failure: SearchFailure) -> Redraw {
        self.searching = false;
        self.alert = Some(Alert::from(&failure));

        match failure.kind {
            FailureKind::Location => Redraw::Skip,
            FailureKind::Service | FailureKind::NoMatches => {
                self.selection.clear();
                Redraw::Needed
            }
        }
    }

    /// Always asks for a redraw so a rejected checkbox snaps back.
    pub fn toggle(&mut self, id: PlaceId, checked: bool) -> Redraw {
        if self.spinning {
            return Redraw::Needed;
        }
        if let Err(e) = self.selection.toggle(id, checked) {
            log::warn!("Selection change rejected: {}", e);
            self.alert = Some(Alert::warning(e.to_string()));
        }
        Redraw::Needed
    }

    pub fn begin_spin<R: Rng + ?Sized>(
        &mut self,
        turns: u32,
        rng: &mut R,
    ) -> Result<Option<SpinPlan>, SpinError> {
        if !self.can_spin() {
            return Ok(None);
        }
        let plan = SpinPlan::random(self.selection.selected_count(), turns, rng)?;
        self.spinning = true;
        self.result = None;
        Ok(Some(plan))
    }

    pub fn finish_spin(&mut self, winner: Option<usize>) {
        self.spinning = false;
        let Some(winner) = winner else {
            return;
        };

        match self.selection.selected_at(winner) {
            Some(restaurant) => {
                log::info!("Wheel picked {}", restaurant.name);
                self.result = Some(SpinResult {
                    name: restaurant.name.to_string(),
                    directions: restaurant.directions_url().map(|u| u.to_string()),
                });
            }
            None => log::error!("Spin landed on sector {} with no restaurant", winner),
        }
    }

    pub fn wheel_labels(&self) -> Vec<String> {
        self.selection
            .labels()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    pub fn alert_text(&self) -> &str {
        self.alert.as_ref().map(|a| a.message.as_str()).unwrap_or("")
    }

    pub fn alert_classes(&self) -> [&'static str; 2] {
        let severity = self.alert.as_ref().map_or(Severity::Error, |a| a.severity);
        ["lunchwheel-alert", severity.into()]
    }

    pub fn result_text(&self) -> String {
        self.result
            .as_ref()
            .map(|r| format!("Selected: {}", r.name))
            .unwrap_or_default()
    }

    pub fn directions_uri(&self) -> &str {
        self.result
            .as_ref()
            .and_then(|r| r.directions.as_deref())
            .unwrap_or("")
    }
}
