pub mod cuisine;
pub mod geo;
pub mod macros;
pub mod place;
pub mod places;
pub mod rank;
pub mod search;
pub mod selection;
pub mod spin;
pub mod wheel;

pub use cuisine::{Cuisine, Keyword};
pub use place::{Coordinates, Place, PlaceId, PlaceName, PlaceType, Restaurant};
pub use search::{Finder, SearchError, SearchOutcome, SearchRequest};
pub use selection::{MAX_SELECTED, Selection, SelectionError};
pub use spin::SpinPlan;
pub use wheel::WheelLayout;
