pub mod alternative_me;
pub mod altseason_api;
pub mod coingecko;
pub mod cryptocompare;
pub mod gdelt;
pub mod util;
