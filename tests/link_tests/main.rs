//! Worker test suite
//!
//! Drives the dispatcher and processor directly through injected channels
//! and in-memory transports.


mod dispatcher_tests;
