//! Administrative lookup table.
//!
//! Districts of Bắc Kạn province and the communes within each, in display
//! order. Read-only reference data used to populate the dependent district
//! and commune selections; nothing here is persisted.

/// District name paired with its ordered commune list.
pub type DistrictEntry = (&'static str, &'static [&'static str]);

/// The full district → communes table.
pub const DISTRICTS: &[DistrictEntry] = &[
    (
        "Thành phố Bắc Kạn",
        &[
            "Phường Phùng Chí Kiên",
            "Phường Sông Cầu",
            "Phường Đức Xuân",
            "Xã Dương Quang",
            "Xã Nông Thượng",
        ],
    ),
    (
        "Huyện Ba Bể",
        &[
            "Thị trấn Chợ Rã",
            "Xã Nam Mẫu",
            "Xã Khang Ninh",
            "Xã Quảng Khê",
            "Xã Đồng Phúc",
        ],
    ),
    (
        "Huyện Bạch Thông",
        &[
            "Thị trấn Phủ Thông",
            "Xã Lục Bình",
            "Xã Vi Hương",
            "Xã Cẩm Giàng",
            "Xã Quân Hà",
        ],
    ),
    (
        "Huyện Chợ Đồn",
        &[
            "Thị trấn Bằng Lũng",
            "Xã Bản Thi",
            "Xã Bình Trung",
            "Xã Nghĩa Tá",
            "Xã Phương Viên",
        ],
    ),
    (
        "Huyện Chợ Mới",
        &[
            "Thị trấn Đồng Tâm",
            "Xã Nông Hạ",
            "Xã Yên Đĩnh",
            "Xã Như Cố",
            "Xã Bình Văn",
        ],
    ),
    (
        "Huyện Na Rì",
        &[
            "Thị trấn Yến Lạc",
            "Xã Côn Minh",
            "Xã Kim Hỷ",
            "Xã Cư Lễ",
            "Xã Xuân Dương",
        ],
    ),
    (
        "Huyện Ngân Sơn",
        &[
            "Thị trấn Vân Tùng",
            "Xã Cốc Đán",
            "Xã Bằng Vân",
            "Xã Thuần Mang",
            "Xã Thượng Quan",
        ],
    ),
    (
        "Huyện Pác Nặm",
        &[
            "Xã Bộc Bố",
            "Xã Cổ Linh",
            "Xã Nghiên Loan",
            "Xã Công Bằng",
            "Xã Nhạn Môn",
        ],
    ),
];

/// District names in display order.
pub fn districts() -> impl Iterator<Item = &'static str> {
    DISTRICTS.iter().map(|(name, _)| *name)
}

/// Communes of a district, or `None` for an unknown district.
#[must_use]
pub fn communes(district: &str) -> Option<&'static [&'static str]> {
    DISTRICTS
        .iter()
        .find(|(name, _)| *name == district)
        .map(|(_, communes)| *communes)
}

/// Whether the commune belongs to the district according to the table.
#[must_use]
pub fn is_known_pair(district: &str, commune: &str) -> bool {
    communes(district).is_some_and(|list| list.contains(&commune))
}
