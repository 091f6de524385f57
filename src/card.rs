use regex::Regex;

use crate::error::{CaravanError, Result};
use crate::models::Booking;
use crate::text::squash;

// ---------------------------------------------------------------------------
// Field-level cleaners
// ---------------------------------------------------------------------------

/// Extract the first run of digits (internal spaces allowed, one optional
/// decimal separator) from free text like "1 950,50$" or "192 $/520.7", comma
/// normalized to dot. No digits → empty string.
pub fn normalize_amount(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }
    let rx = Regex::new(r"(\d[\d\s]*[.,]?\d*)").unwrap();
    let Some(m) = rx.find(raw) else {
        return String::new();
    };
    let cleaned: String = m
        .as_str()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    cleaned.trim_end_matches('.').to_string()
}

/// Best-effort placement code for card text: fixed keyword set, first match
/// wins, anything else passes through unchanged.
pub fn normalize_room_code(text: &str) -> String {
    let trimmed = squash(text);
    if trimmed.is_empty() {
        return String::new();
    }
    let t = trimmed.to_uppercase();
    if t.contains("SNGL") || t.contains("SGL") {
        return "SNGL".to_string();
    }
    if t.contains("DBL") {
        return "DBL".to_string();
    }
    if t.contains("TRPL") {
        return "TRPL".to_string();
    }
    if t.contains("QDR") || t.contains("QUAD") {
        return "QDR".to_string();
    }
    trimmed
}

/// Best-effort meal code, same contract as [`normalize_room_code`].
pub fn normalize_meal_code(text: &str) -> String {
    let trimmed = squash(text);
    if trimmed.is_empty() {
        return String::new();
    }
    let t = trimmed.to_uppercase();
    for code in ["HB", "BB", "FB", "AI"] {
        if t.contains(code) {
            return code.to_string();
        }
    }
    trimmed
}

// ---------------------------------------------------------------------------
// CardParser
// ---------------------------------------------------------------------------

/// Line-based parser for free-text booking cards. Each field is a
/// `label : value` line; labels come in two languages with several accepted
/// spellings, and `:`, `-` and `–` all work as separators. Compiled once,
/// reused for every incoming message.
pub struct CardParser {
    transport_header: Regex,
    boundary: Regex,
    full_name: Regex,
    departure_date: Regex,
    package_name: Regex,
    amount: Regex,
    paid_amount: Regex,
    placement: Regex,
    meal: Regex,
    rate: Regex,
    visa: Regex,
    region: Regex,
    departure_city: Regex,
    manager: Regex,
    phone: Regex,
    train: Regex,
    avia: Regex,
    source: Regex,
    contract: Regex,
    contract_date: Regex,
    comment_label: Regex,
}

fn label_rx(labels: &[&str]) -> Regex {
    let alternatives = labels
        .iter()
        .map(|l| regex::escape(l))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)^(?:{alternatives})\s*[:\-–]\s*(.*)$")).unwrap()
}

impl Default for CardParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CardParser {
    pub fn new() -> Self {
        Self {
            // Chat transport prefix: [6:22 PM, 11/27/2025] +7 708 013 2211:
            transport_header: Regex::new(
                r"(?m)^\[\d{1,2}:\d{2}\s*[AP]M,\s*\d{1,2}/\d{1,2}/\d{4}\]\s+.+?:\s*",
            )
            .unwrap(),
            boundary: Regex::new(r"(?im)^(?:ФИО|FIO|Full name)\s*[:\-–]").unwrap(),
            full_name: label_rx(&["ФИО", "FIO", "Full name"]),
            departure_date: label_rx(&["Дата вылета", "Дата", "Departure date"]),
            package_name: label_rx(&["Пакет название", "Пакет", "Package"]),
            amount: label_rx(&["Сумма", "Amount"]),
            // both spellings of the paid label occur in the wild: one with a
            // Latin C, one fully Cyrillic
            paid_amount: label_rx(&["Cумма оплаты", "Сумма оплаты", "Оплата", "Paid"]),
            placement: label_rx(&["Размещение", "Placement"]),
            meal: label_rx(&["Питание", "Meal"]),
            rate: label_rx(&["Курс $", "Курс$", "Курс", "Rate"]),
            visa: label_rx(&["Виза", "Visa"]),
            region: label_rx(&["Регион", "Region"]),
            departure_city: label_rx(&["Вылет", "Departure city"]),
            manager: label_rx(&["Менеджер", "Manager"]),
            phone: label_rx(&["Контактные номера", "Телефон", "Номер", "Phone"]),
            train: label_rx(&["Поезд", "Train"]),
            avia: label_rx(&["Авиа запрос", "Авиа", "Avia"]),
            source: label_rx(&["Источник", "Source"]),
            contract: label_rx(&["Договор", "Contract"]),
            contract_date: label_rx(&["Дата договора", "Contract date"]),
            comment_label: Regex::new(
                r"(?i)^(?:Комментарии|Комментарий|Коммент|Comments|Comment)\s*[:\-–]?\s*(.*)$",
            )
            .unwrap(),
        }
    }

    fn strip_transport(&self, text: &str) -> String {
        self.transport_header
            .replace_all(text, "")
            .replace(['\u{202A}', '\u{202C}'], "")
    }

    fn clean_lines(&self, text: &str) -> Vec<String> {
        self.strip_transport(text)
            .lines()
            .map(squash)
            .filter(|l| !l.is_empty())
            .collect()
    }

    /// Split a big pasted message into independent card texts at each
    /// full-name label line (lookahead; the label stays with its card).
    /// No full-name line anywhere → empty vec.
    pub fn split_cards(&self, text: &str) -> Vec<String> {
        let t = self.strip_transport(text);
        let starts: Vec<usize> = self.boundary.find_iter(&t).map(|m| m.start()).collect();
        let mut cards = Vec::new();
        for (i, &start) in starts.iter().enumerate() {
            let end = starts.get(i + 1).copied().unwrap_or(t.len());
            let card = t[start..end].trim();
            if !card.is_empty() {
                cards.push(card.to_string());
            }
        }
        cards
    }

    /// Parse ONE card. The full name is the only mandatory field; its absence
    /// is the single hard failure. Everything else defaults to empty.
    pub fn parse(&self, text: &str) -> Result<Booking> {
        let lines = self.clean_lines(text);

        // Everything from the comment label onward is comment body, captured
        // verbatim and excluded from label scanning.
        let comment_at = lines.iter().position(|l| self.comment_label.is_match(l));
        let head = &lines[..comment_at.unwrap_or(lines.len())];

        let full_name = first_value(head, &self.full_name);
        if full_name.is_empty() {
            return Err(CaravanError::NoCard);
        }
        let (last_name, first_name) = split_name(&full_name);

        let comments = match comment_at {
            Some(i) => {
                let inline = self
                    .comment_label
                    .captures(&lines[i])
                    .and_then(|c| c.get(1))
                    .map(|m| m.as_str().trim())
                    .unwrap_or("");
                let mut body: Vec<&str> = Vec::new();
                if !inline.is_empty() {
                    body.push(inline);
                }
                body.extend(lines[i + 1..].iter().map(|l| l.as_str()));
                body.join("\n").trim().to_string()
            }
            None => String::new(),
        };

        let amount = first_value(head, &self.amount);
        let paid_amount = first_value(head, &self.paid_amount);
        let placement = first_value(head, &self.placement);
        let meal = first_value(head, &self.meal);

        Ok(Booking {
            amount_clean: normalize_amount(&amount),
            paid_amount_clean: normalize_amount(&paid_amount),
            placement_code: normalize_room_code(&placement),
            meal_code: normalize_meal_code(&meal),
            full_name,
            last_name,
            first_name,
            departure_date: first_value(head, &self.departure_date),
            package_name: first_value(head, &self.package_name),
            amount,
            paid_amount,
            placement,
            meal,
            rate: first_value(head, &self.rate),
            visa: first_value(head, &self.visa),
            region: first_value(head, &self.region),
            departure_city: first_value(head, &self.departure_city),
            manager: first_value(head, &self.manager),
            phone: first_value(head, &self.phone),
            train: first_value(head, &self.train),
            avia: first_value(head, &self.avia),
            source: first_value(head, &self.source),
            contract: first_value(head, &self.contract),
            contract_date: first_value(head, &self.contract_date),
            comments,
            raw: text.to_string(),
        })
    }

    /// Parse one OR several concatenated cards. Cards whose full name is
    /// missing are skipped; no cards at all yields an empty vec.
    pub fn parse_all(&self, text: &str) -> Vec<Booking> {
        self.split_cards(text)
            .iter()
            .filter_map(|card| self.parse(card).ok())
            .collect()
    }
}

fn first_value(lines: &[String], rx: &Regex) -> String {
    for line in lines {
        if let Some(caps) = rx.captures(line) {
            return squash(caps.get(1).map_or("", |m| m.as_str()));
        }
    }
    String::new()
}

// Last name is the first whitespace token, first name is the rest. Nothing
// is lost: joining the parts back with one space reproduces the full name.
fn split_name(full: &str) -> (String, String) {
    let mut parts = full.split_whitespace();
    let last = parts.next().unwrap_or("").to_string();
    let first = parts.collect::<Vec<_>>().join(" ");
    (last, first)
}
