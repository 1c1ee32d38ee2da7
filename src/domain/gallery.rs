//! The gallery catalogue: a fixed list of image collections grouped by event.
//!
//! The catalogue is compile-time data; only the image host prefix comes from
//! configuration. File names are relative to that prefix.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GalleryEvent {
    pub name: &'static str,
    pub images: &'static [&'static str],
}

pub const GALLERY_EVENTS: &[GalleryEvent] = &[
    GalleryEvent {
        name: "Xpecto'25 IIT Mandi",
        images: &[
            "xpecto1.jpg",
            "xpecto2.jpg",
            "xpecto3.jpg",
            "xpecto4.jpg",
            "xpecto5.jpg",
        ],
    },
    GalleryEvent {
        name: "Bharat Mobility Expo 2025",
        images: &[
            "mobility1.jpg",
            "mobility4.jpg",
            "mobility2.jpg",
            "mobility3.jpg",
        ],
    },
    GalleryEvent {
        name: "CU Tech-Invent",
        images: &["techinvent1.JPG", "techinvent2.jpg"],
    },
    GalleryEvent {
        name: "Technoxian WRC 2024",
        images: &[
            "technoxian1.jpg",
            "technoxian2.jpg",
            "technoxian3.jpg",
            "technoxian4.jpg",
            "technoxian5.jpg",
            "technoxian6.jpg",
        ],
    },
];

/// Whether `file` names an image in the catalogue. Preview requests for
/// anything else are ignored rather than reflected back into the page.
pub fn is_known_image(file: &str) -> bool {
    GALLERY_EVENTS
        .iter()
        .any(|event| event.images.contains(&file))
}
