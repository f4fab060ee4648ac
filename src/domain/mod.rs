pub mod prospect;
pub mod search;
pub mod site_signals;
pub mod venue;
