//! Foreign exchange option conventions.
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::fx::{Direction, FxOptionType, NotionalCurrency};
//!
//! let option_type: FxOptionType = "Put".parse().unwrap();
//! let direction: Direction = "Client sells".parse().unwrap();
//!
//! assert!(option_type.is_put());
//! assert_eq!(direction.hedge_sign(), -1.0);
//! assert_eq!(NotionalCurrency::default(), NotionalCurrency::For);
//! ```

mod option;

pub use option::{ConventionParseError, Direction, FxOptionType, NotionalCurrency};
