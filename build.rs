use std::env;
use std::path::PathBuf;

// FFmpeg discovery hints for Windows builds. On other platforms
// ffmpeg-sys-next finds the system libraries via pkg-config.
fn main() {
    println!("cargo:rerun-if-env-changed=FFMPEG_DIR");
    println!("cargo:rerun-if-env-changed=VCPKG_ROOT");

    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os != "windows" || env::var_os("FFMPEG_DIR").is_some() {
        return;
    }

    match env::var("VCPKG_ROOT") {
        Ok(root) => {
            let triplet =
                env::var("VCPKGRS_TRIPLET").unwrap_or_else(|_| "x64-windows".to_string());
            let ffmpeg_dir = PathBuf::from(&root).join("installed").join(&triplet);
            if ffmpeg_dir.exists() {
                println!(
                    "cargo:warning=Found vcpkg FFmpeg at {}; set FFMPEG_DIR={} to make discovery explicit.",
                    ffmpeg_dir.display(),
                    ffmpeg_dir.display(),
                );
            } else {
                println!(
                    "cargo:warning=VCPKG_ROOT is set but no FFmpeg install exists at {}.",
                    ffmpeg_dir.display(),
                );
            }
        }
        Err(_) => {
            println!(
                "cargo:warning=FFMPEG_DIR is not set. On Windows, install FFmpeg via vcpkg and set VCPKG_ROOT + FFMPEG_DIR."
            );
        }
    }
}
