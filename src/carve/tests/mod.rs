mod test_utils;
mod geometry_tests;
