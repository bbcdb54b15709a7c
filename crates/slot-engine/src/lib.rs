//! # slot-engine
//!
//! Bookable-slot resolution for appointment scheduling.
//!
//! Given a professional, a date, a slot length, the business and professional
//! working hours, and the time already taken by appointments and blackouts,
//! the engine lists the slots still open for booking. On top of that it scans a
//! rolling window of dates and reports which ones have any capacity.
//!
//! Every operation is a pure function of its inputs. The current instant is
//! always passed in, never read from the system clock.
//!
//! ## Modules
//!
//! - [`schedule`] -- Effective working hours (professional override over business default)
//! - [`interval`] -- Base free intervals, busy-time subtraction, clamping
//! - [`slots`] -- Fixed-length slot packing and past-slot filtering
//! - [`availability`] -- Single-day slot lists and multi-day capacity scans
//! - [`dst`] -- Anchoring wall-clock times across DST transitions
//! - [`config`] -- Business timezone and scan rules
//! - [`model`] -- Input data shapes from the booking stores
//! - [`label`] -- Display labels for available days
//! - [`error`] -- Error types

pub mod availability;
pub mod config;
pub mod dst;
pub mod error;
pub mod interval;
pub mod label;
pub mod model;
pub mod schedule;
pub mod slots;

pub use availability::{
    availability_for_professional_on_day, business_availability_on_day, find_available_days,
    AvailabilityDay, DayAvailability, ProfessionalAvailability, ScanTarget, Slot,
};
pub use config::EngineConfig;
pub use dst::DstPolicy;
pub use error::EngineError;
pub use label::LabelLocale;
pub use model::{
    AppointmentStatus, BusyInterval, BusyKind, Professional, TimeInterval, WorkingHoursRecord,
};
pub use schedule::{resolve, EffectiveSchedule};
