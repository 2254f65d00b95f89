//! Client scenario tests.

mod booking_tests;
mod fetcher_tests;
mod navigation_tests;
mod search_tests;
mod theme_tests;
