use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::text::{norm_key, norm_tight};

// ---------------------------------------------------------------------------
// Room types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    Single,
    Double,
    Twin,
    Triple,
    Quad,
}

impl RoomType {
    /// Beds in a room of this type. Children do not count against it.
    pub fn capacity(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Double | Self::Twin => 2,
            Self::Triple => 3,
            Self::Quad => 4,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Single => "SGL",
            Self::Double => "DBL",
            Self::Twin => "TWIN",
            Self::Triple => "TRPL",
            Self::Quad => "QUAD",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "SGL" | "SNGL" => Some(Self::Single),
            "DBL" => Some(Self::Double),
            "TWIN" => Some(Self::Twin),
            "TRPL" => Some(Self::Triple),
            "QUAD" | "QDR" => Some(Self::Quad),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// AliasBook
// ---------------------------------------------------------------------------

/// Process-wide synonym tables, loaded once and treated as immutable
/// afterwards. Resolution is substring containment against each table in
/// declared order; the first matching tag wins. Sheets are inconsistent and
/// rely on that first-match order, so table order is a contract, not an
/// implementation detail.
pub struct AliasBook {
    rooms: Vec<(RoomType, Vec<String>)>,
    meals: Vec<(String, Vec<String>)>,
    cities: Vec<(String, Vec<String>)>,
    packages: Vec<(String, Vec<String>)>,
    equivalent_packages: Vec<(String, String)>,
    extra_noise: Vec<String>,
    noise: Vec<String>,
    reserved_words: Vec<String>,
    child_marker: Regex,
    date_token: Regex,
}

// Digit fallback order when no synonym matches a room-type token.
const DIGIT_TIERS: [(char, RoomType); 4] = [
    ('4', RoomType::Quad),
    ('3', RoomType::Triple),
    ('2', RoomType::Double),
    ('1', RoomType::Single),
];

const HOTEL_HINTS: [&str; 7] = [
    "hotel",
    "hotels",
    "отель",
    "отели",
    "хотел",
    "accommodation",
    "размещение",
];

const STOP_HINTS: [&str; 6] = ["transfer", "train", "bus", "guide", "гид", "трансфер"];

// Substring tokens that mark a cell as service text rather than a person.
const BASE_NOISE: [&str; 10] = [
    "makkah", "madinah", "перенос", "авиа", "stop sale", "бронь", "bus", "train",
    "изменение", "transfer",
];

// Exact-match words that are never a name on their own. The two-letter
// transport markers (OW/RT) live here rather than in the substring list,
// which would swallow real surnames like Brown.
const RESERVED_WORDS: [&str; 22] = [
    "hb", "ro", "ow", "rt", "bus", "train", "business", "child", "guide", "double",
    "triple", "quadro", "single", "twin", "yes", "tour", "own", "visa", "f", "m",
    "inf", "-",
];

// Observed non-person strings that no alias table covers.
const MANUAL_NOISE: [&str; 6] = [
    "address", "swissotel", "fairmont", "rotana", "riyadh", "al ula",
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for AliasBook {
    fn default() -> Self {
        let rooms = vec![
            (
                RoomType::Quad,
                strings(&["quad", "quadro", "quadruple", "quard", "quattro", "qdr", "qvdr", "квадр", "4pax"]),
            ),
            (RoomType::Triple, strings(&["trpl", "triple", "tpl", "трипл", "трпл"])),
            (RoomType::Twin, strings(&["twin", "twn"])),
            (RoomType::Double, strings(&["dbl", "double", "дабл", "дбл", "двойн"])),
            (RoomType::Single, strings(&["sngl", "sgl", "single", "одномест"])),
        ];
        let meals = vec![
            ("HB".to_string(), strings(&["hb", "half board", "полупансион"])),
            ("BB".to_string(), strings(&["bb", "bed and breakfast", "завтрак"])),
            ("FB".to_string(), strings(&["fb", "full board"])),
            ("AI".to_string(), strings(&["ai", "all inclusive"])),
        ];
        let cities = vec![
            (
                "madinah".to_string(),
                strings(&["madinah", "medinah", "medina", "madina", "мадина", "медина"]),
            ),
            (
                "makkah".to_string(),
                strings(&["makkah", "makka", "mecca", "mekka", "мекка", "макка"]),
            ),
            ("jeddah".to_string(), strings(&["jeddah", "джедда", "джидда"])),
            ("alula".to_string(), strings(&["al ula", "al-ula", "alula", "алула"])),
        ];
        // Synonyms here are in tight form (lowercase, no whitespace); titles
        // are normalized the same way before lookup.
        let packages = vec![
            ("niyet".to_string(), strings(&["niyet", "ниет", "акцион"])),
            ("hikma".to_string(), strings(&["hikma", "хикма"])),
            ("4u".to_string(), strings(&["izi", "4you", "4u", "swissotel", "fairmont"])),
            ("amal".to_string(), strings(&["amal", "амал"])),
            ("aroya".to_string(), strings(&["aroya", "ароя"])),
            ("shohada".to_string(), strings(&["shohada"])),
        ];
        let mut book = Self {
            rooms,
            meals,
            cities,
            packages,
            equivalent_packages: vec![("4u".to_string(), "amal".to_string())],
            extra_noise: strings(&MANUAL_NOISE),
            noise: Vec::new(),
            reserved_words: strings(&RESERVED_WORDS),
            child_marker: Regex::new(r"(?i)\b(inf(ant)?|chd|child|kid|реб(ён|ен)ок|дет(и|ск))\b")
                .unwrap(),
            date_token: Regex::new(r"\d{1,2}[./-]\d{1,2}[./-]\d{2,4}").unwrap(),
        };
        book.rebuild_noise();
        book
    }
}

impl AliasBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical room type for an arbitrary cell/token, or None. Synonym
    /// tables first (declared order), then the bare-digit fallback: a 1–4
    /// present anywhere in the token maps to the capacity tier.
    pub fn room_type(&self, raw: &str) -> Option<RoomType> {
        let t = norm_key(raw);
        if t.is_empty() {
            return None;
        }
        for (kind, synonyms) in &self.rooms {
            if synonyms.iter().any(|s| t.contains(s.as_str())) {
                return Some(*kind);
            }
        }
        for (digit, kind) in DIGIT_TIERS {
            if t.contains(digit) {
                return Some(kind);
            }
        }
        None
    }

    pub fn meal_code(&self, raw: &str) -> Option<&str> {
        let t = norm_key(raw);
        if t.is_empty() {
            return None;
        }
        self.meals
            .iter()
            .find(|(_, synonyms)| synonyms.iter().any(|s| t.contains(s.as_str())))
            .map(|(code, _)| code.as_str())
    }

    pub fn city(&self, raw: &str) -> Option<&str> {
        let t = norm_key(raw);
        if t.is_empty() {
            return None;
        }
        self.cities
            .iter()
            .find(|(_, synonyms)| synonyms.iter().any(|s| t.contains(s.as_str())))
            .map(|(tag, _)| tag.as_str())
    }

    /// Canonical package family for a sheet/card title ("IZI SWISSOTEL",
    /// "NIYET 7 DAYS", …), or None.
    pub fn package_family(&self, title: &str) -> Option<&str> {
        let t = norm_tight(title);
        if t.is_empty() {
            return None;
        }
        self.packages
            .iter()
            .find(|(_, synonyms)| synonyms.iter().any(|s| t.contains(s.as_str())))
            .map(|(tag, _)| tag.as_str())
    }

    /// Family equality, consulting the declared equivalence pairs — some
    /// operator sub-brands sell the same departure under two names.
    pub fn same_family(&self, a: &str, b: &str) -> bool {
        if a.is_empty() || b.is_empty() {
            return false;
        }
        if a == b {
            return true;
        }
        self.equivalent_packages
            .iter()
            .any(|(x, y)| (x == a && y == b) || (x == b && y == a))
    }

    pub fn is_child_marker(&self, s: &str) -> bool {
        self.child_marker.is_match(s)
    }

    pub fn has_date_token(&self, s: &str) -> bool {
        self.date_token.is_match(s)
    }

    /// Substring denylist hit: the lowercased candidate contains a known
    /// non-person token (city, hotel, package, service text).
    pub fn noise_hit(&self, low: &str) -> bool {
        self.noise.iter().any(|tok| low.contains(tok.as_str()))
    }

    /// Exact denylist hit: the candidate IS a marker word, not a name.
    pub fn is_reserved_word(&self, low: &str) -> bool {
        self.reserved_words.iter().any(|w| w == low)
    }

    pub fn add_room_synonyms(&mut self, kind: RoomType, synonyms: &[String]) {
        if let Some((_, list)) = self.rooms.iter_mut().find(|(k, _)| *k == kind) {
            list.extend(synonyms.iter().map(|s| norm_key(s)));
        }
        self.rebuild_noise();
    }

    pub fn add_meal_synonyms(&mut self, code: &str, synonyms: &[String]) {
        if let Some((_, list)) = self.meals.iter_mut().find(|(c, _)| c == code) {
            list.extend(synonyms.iter().map(|s| norm_key(s)));
        }
    }

    pub fn add_city_synonyms(&mut self, tag: &str, synonyms: &[String]) {
        if let Some((_, list)) = self.cities.iter_mut().find(|(t, _)| t == tag) {
            list.extend(synonyms.iter().map(|s| norm_key(s)));
        } else {
            self.cities
                .push((tag.to_string(), synonyms.iter().map(|s| norm_key(s)).collect()));
        }
        self.rebuild_noise();
    }

    pub fn add_package_synonyms(&mut self, tag: &str, synonyms: &[String]) {
        let tight: Vec<String> = synonyms.iter().map(|s| norm_tight(s)).collect();
        if let Some((_, list)) = self.packages.iter_mut().find(|(t, _)| t == tag) {
            list.extend(tight);
        } else {
            self.packages.push((tag.to_string(), tight));
        }
        self.rebuild_noise();
    }

    pub fn add_equivalence(&mut self, a: &str, b: &str) {
        self.equivalent_packages.push((a.to_string(), b.to_string()));
    }

    pub fn add_noise(&mut self, tokens: &[String]) {
        self.extra_noise.extend(tokens.iter().map(|s| norm_key(s)));
        self.rebuild_noise();
    }

    // The non-person denylist is assembled from the same tables used for
    // resolution, so a synonym added once filters guest rows too. Tokens of
    // one or two characters are skipped: too short to mean anything as a
    // substring.
    fn rebuild_noise(&mut self) {
        let mut noise: Vec<String> = Vec::new();
        let mut push = |tok: &str| {
            let t = tok.to_lowercase();
            if t.chars().count() > 2 && !noise.contains(&t) {
                noise.push(t);
            }
        };
        for tok in BASE_NOISE {
            push(tok);
        }
        for (_, synonyms) in &self.cities {
            for s in synonyms {
                push(s);
            }
        }
        for (_, synonyms) in &self.packages {
            for s in synonyms {
                push(s);
            }
        }
        for tok in HOTEL_HINTS {
            push(tok);
        }
        for tok in STOP_HINTS {
            push(tok);
        }
        for tok in &self.extra_noise {
            push(tok);
        }
        self.noise = noise;
    }
}
