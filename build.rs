fn main() {
    // The ESP-IDF environment only matters for the firmware binary; host
    // builds (tests, fuzzing) skip it entirely.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
