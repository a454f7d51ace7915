//! Rule engine deciding which class of API change is currently permitted

pub mod composer;
pub mod rules;

pub use composer::{compose, EnforcementDecision};
pub use rules::{EnforceAfterVersionRule, InitialDevelopmentRule, SemVerLevelRule};
