//! Analysis helpers for seam detection

/// Statistics over seam scores and seam spacings
pub mod statistics;
