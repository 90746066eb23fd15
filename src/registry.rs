//! maps a dealer name to a fresh, unreset [`Dealer`] -- the one place that
//! knows the full set of algorithm names.

use crate::dealer::{Dealer, Kind};
use crate::error::Error;

/// every dealer name this crate understands, in no particular order.
pub const DEALER_NAMES: [&str; 4] = ["bitmap", "fisher_yates", "adaptive", "perfect"];

/// builds a dealer for `name`. the dealer is not usable until
/// [`Dealer::reset`] is called.
pub fn get_dealer(name: &str) -> Result<Dealer, Error> {
    let kind = match name {
        "bitmap" => Kind::Bitmap,
        "fisher_yates" => Kind::FisherYates,
        "adaptive" => Kind::Adaptive,
        "perfect" => Kind::Perfect,
        other => {
            log::warn!("unknown dealer {other:?} requested");
            return Err(Error::UnknownDealer(other.to_string()));
        }
    };
    Ok(Dealer::new(kind))
}
