//! Generates Kotlin and Swift bindings from the compiled bridge library.

fn main() {
    uniffi::uniffi_bindgen_main();
}
