//! Argument and parameter types used by LBS Application Commands

use atat::atat_derive::AtatEnum;

/// Operation performed by +CLBSCFG
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
pub enum LbsConfigOperation {
    Read = 0,
    Write = 1,
}

/// Parameter addressed by +CLBSCFG
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
pub enum LbsParameter {
    CustomerId = 1,
    TimesUsed = 2,
    ServerAddress = 3,
}

/// Kind of information requested with +CLBS
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
pub enum LocationType {
    /// • 1: longitude and latitude
    LongitudeLatitude = 1,
    /// • 2: detail address
    DetailAddress = 2,
    /// • 3: access times
    AccessTimes = 3,
    /// • 4: longitude, latitude and date/time
    LongitudeLatitudeTime = 4,
}
