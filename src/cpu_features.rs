//! CPU feature detection (C2).
//!
//! Detects AVX-512F / AVX2 / NEON once per process and caches the result in
//! a `OnceLock`, replacing the C reference's `static bool g_features_detected`
//! globals (`detect_cpu_features` in `aho_corasick.c`) with a safe,
//! lazily-initialized singleton.

use std::sync::OnceLock;

/// Which SIMD instruction sets the current CPU supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuFeatures {
    pub avx512f: bool,
    pub avx2: bool,
    pub neon: bool,
}

impl CpuFeatures {
    /// True if any SIMD search path is available (`ac_has_simd_support`).
    pub fn any_simd(&self) -> bool {
        self.avx512f || self.avx2 || self.neon
    }

    /// Human-readable summary (`ac_get_simd_info` / `simd_ac_get_cpu_info`).
    pub fn info_string(&self) -> String {
        format!(
            "AVX-512: {}, AVX2: {}, NEON: {}",
            yes_no(self.avx512f),
            yes_no(self.avx2),
            yes_no(self.neon),
        )
    }

    fn detect() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            CpuFeatures {
                avx512f: is_x86_feature_detected!("avx512f"),
                avx2: is_x86_feature_detected!("avx2"),
                neon: false,
            }
        }
        #[cfg(target_arch = "aarch64")]
        {
            CpuFeatures {
                avx512f: false,
                avx2: false,
                neon: std::arch::is_aarch64_feature_detected!("neon"),
            }
        }
        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        {
            CpuFeatures {
                avx512f: false,
                avx2: false,
                neon: false,
            }
        }
    }
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}

/// Return the process-wide, lazily-detected CPU feature set.
pub fn detected() -> CpuFeatures {
    static FEATURES: OnceLock<CpuFeatures> = OnceLock::new();
    *FEATURES.get_or_init(CpuFeatures::detect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detection_is_idempotent() {
        assert_eq!(detected(), detected());
    }

    #[test]
    fn info_string_mentions_all_three() {
        let s = detected().info_string();
        assert!(s.contains("AVX-512"));
        assert!(s.contains("AVX2"));
        assert!(s.contains("NEON"));
    }

    #[test]
    fn non_detected_archs_have_no_simd() {
        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        assert!(!detected().any_simd());
    }
}
