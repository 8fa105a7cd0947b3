// src/matching/normalize.rs - Ward name normalization

/// Administrative-unit prefixes stripped from ward-level names before
/// matching, in priority order. The scan stops at the first prefix whose
/// upper-cased form matches the start of the upper-cased name, so an
/// earlier entry wins even when a later one would also match ("KCN " is
/// removed from "KCN -Tân Tạo", leaving "-Tân Tạo"). This ordering is a
/// fixed policy carried over from the production mapping job.
pub const WARD_NAME_PREFIXES: [&str; 11] = [
    "TT ",
    "TX ",
    "KCN ",
    "KCN -",
    "KHU CÔNG NGHIỆP ",
    "KHU CN ",
    "ẤP ",
    "CHỢ ",
    "PHƯỜNG ",
    "XÃ ",
    "THỊ TRẤN ",
];

/// Strips the first matching administrative prefix from `name` and trims
/// surrounding whitespace. The prefix comparison is case-insensitive but
/// the remainder keeps its original casing; callers that need a
/// case-folded form upper-case the result themselves.
pub fn clean_prefix(name: &str) -> String {
    let upper = name.to_uppercase();
    for prefix in WARD_NAME_PREFIXES {
        if upper.starts_with(prefix) {
            // Vietnamese upper-casing maps one char to one char, so the
            // prefix char count locates the cut in the original string.
            let rest: String = name.chars().skip(prefix.chars().count()).collect();
            return rest.trim().to_string();
        }
    }
    name.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_ward_prefix_keeping_original_case() {
        assert_eq!(clean_prefix("Phường Xuân Đỉnh"), "Xuân Đỉnh");
        assert_eq!(clean_prefix("PHƯỜNG XUÂN ĐỈNH"), "XUÂN ĐỈNH");
        assert_eq!(clean_prefix("Xã Tân Triều"), "Tân Triều");
        assert_eq!(clean_prefix("Thị trấn Đông Anh"), "Đông Anh");
    }

    #[test]
    fn strips_abbreviated_and_industrial_prefixes() {
        assert_eq!(clean_prefix("TT Cờ Đỏ"), "Cờ Đỏ");
        assert_eq!(clean_prefix("TX Sơn Tây"), "Sơn Tây");
        assert_eq!(clean_prefix("Khu công nghiệp Bắc Thăng Long"), "Bắc Thăng Long");
        assert_eq!(clean_prefix("Khu CN Tân Bình"), "Tân Bình");
        assert_eq!(clean_prefix("Ấp Bình Hòa"), "Bình Hòa");
        assert_eq!(clean_prefix("Chợ Lách"), "Lách");
    }

    #[test]
    fn only_first_declared_prefix_is_removed() {
        // "KCN " is declared before "KCN -", so only the shorter one goes.
        assert_eq!(clean_prefix("KCN -Tân Tạo"), "-Tân Tạo");
        // One prefix per call; an inner prefix survives.
        assert_eq!(clean_prefix("TT Phường Mới"), "Phường Mới");
    }

    #[test]
    fn no_prefix_returns_trimmed_original() {
        assert_eq!(clean_prefix("  Xuân Đỉnh  "), "Xuân Đỉnh");
        assert_eq!(clean_prefix("Long Biên"), "Long Biên");
    }

    #[test]
    fn prefix_must_be_at_start() {
        assert_eq!(clean_prefix("Nam Xã Đoài"), "Nam Xã Đoài");
    }

    #[test]
    fn empty_name() {
        assert_eq!(clean_prefix(""), "");
    }
}
