use std::fs;
use std::path::Path;

#[cfg(target_os = "windows")]
const PDFIUM_LIBRARY: &str = "pdfium.dll";
#[cfg(target_os = "macos")]
const PDFIUM_LIBRARY: &str = "libpdfium.dylib";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const PDFIUM_LIBRARY: &str = "libpdfium.so";

fn main() {
    let workspace_root = env!("CARGO_MANIFEST_DIR")
        .split("crates")
        .next()
        .expect("Failed to determine workspace root");

    let vendor_lib = Path::new(workspace_root)
        .join("vendor")
        .join("pdfium")
        .join(PDFIUM_LIBRARY);

    let out_dir = std::env::var("OUT_DIR").expect("OUT_DIR not set");
    let out_path = Path::new(&out_dir);

    let target_dir = out_path
        .parent()
        .and_then(|p| p.parent())
        .and_then(|p| p.parent())
        .expect("Failed to determine target directory");

    let dest_lib = target_dir.join(PDFIUM_LIBRARY);

    if vendor_lib.exists() {
        fs::copy(&vendor_lib, &dest_lib).expect("Failed to copy PDFium library");
        println!(
            "cargo:warning=Copied {} from vendor to {}",
            PDFIUM_LIBRARY,
            dest_lib.display()
        );
    }

    println!("cargo:rerun-if-changed={}", vendor_lib.display());
}
