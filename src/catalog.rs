// Airport, airline and aircraft display names
use crate::error::NormalizeError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

fn builtin_airport(code: &str) -> Option<&'static str> {
    let name = match code {
        "BKK" => "ท่าอากาศยานสุวรรณภูมิ",
        "DMK" => "ท่าอากาศยานดอนเมือง",
        "CNX" => "ท่าอากาศยานนานาชาติเชียงใหม่",
        "CEI" => "ท่าอากาศยานนานาชาติแม่ฟ้าหลวง เชียงราย",
        "HKT" => "ท่าอากาศยานนานาชาติภูเก็ต",
        "KBV" => "ท่าอากาศยานนานาชาติกระบี่",
        "USM" => "ท่าอากาศยานสมุย",
        "HDY" => "ท่าอากาศยานนานาชาติหาดใหญ่",
        "URT" => "ท่าอากาศยานสุราษฎร์ธานี",
        "UTH" => "ท่าอากาศยานนานาชาติอุดรธานี",
        "KKC" => "ท่าอากาศยานขอนแก่น",
        "UBP" => "ท่าอากาศยานอุบลราชธานี",
        "NST" => "ท่าอากาศยานนครศรีธรรมราช",
        "TST" => "ท่าอากาศยานตรัง",
        "NRT" => "ท่าอากาศยานนานาชาตินาริตะ",
        "HND" => "ท่าอากาศยานฮาเนดะ",
        "KIX" => "ท่าอากาศยานนานาชาติคันไซ",
        "ICN" => "ท่าอากาศยานนานาชาติอินช็อน",
        "SIN" => "ท่าอากาศยานชางงี",
        "HKG" => "ท่าอากาศยานนานาชาติฮ่องกง",
        "KUL" => "ท่าอากาศยานนานาชาติกัวลาลัมเปอร์",
        "TPE" => "ท่าอากาศยานนานาชาติเถา-ยฺเหวียน",
        "SGN" => "ท่าอากาศยานนานาชาติเตินเซินเญิ้ต",
        "HAN" => "ท่าอากาศยานนานาชาตินอยบ่าย",
        "LHR" => "ท่าอากาศยานฮีทโธรว์",
        "DXB" => "ท่าอากาศยานนานาชาติดูไบ",
        _ => return None,
    };
    Some(name)
}

fn builtin_airline(code: &str) -> Option<&'static str> {
    let name = match code {
        "TG" => "การบินไทย",
        "WE" => "ไทยสมายล์",
        "FD" => "ไทยแอร์เอเชีย",
        "XJ" => "ไทยแอร์เอเชีย เอ็กซ์",
        "SL" => "ไทยไลอ้อนแอร์",
        "PG" => "บางกอกแอร์เวย์ส",
        "DD" => "นกแอร์",
        "VZ" => "ไทยเวียตเจ็ทแอร์",
        "SQ" => "สิงคโปร์แอร์ไลน์",
        "CX" => "คาเธ่ย์แปซิฟิค",
        "JL" => "เจแปนแอร์ไลน์",
        "NH" => "ออลนิปปอนแอร์เวย์",
        "KE" => "โคเรียนแอร์",
        "OZ" => "เอเชียน่าแอร์ไลน์",
        "MH" => "มาเลเซียแอร์ไลน์",
        "VN" => "เวียดนามแอร์ไลน์",
        "EK" => "เอมิเรตส์",
        "QR" => "กาตาร์แอร์เวย์",
        _ => return None,
    };
    Some(name)
}

fn builtin_aircraft(code: &str) -> Option<&'static str> {
    let name = match code {
        "320" => "Airbus A320",
        "32N" => "Airbus A320neo",
        "321" => "Airbus A321",
        "32Q" => "Airbus A321neo",
        "330" | "333" => "Airbus A330-300",
        "359" => "Airbus A350-900",
        "388" => "Airbus A380-800",
        "738" => "Boeing 737-800",
        "7M8" => "Boeing 737 MAX 8",
        "772" => "Boeing 777-200",
        "77W" => "Boeing 777-300ER",
        "788" => "Boeing 787-8",
        "789" => "Boeing 787-9",
        "AT7" => "ATR 72",
        "DH4" => "De Havilland Dash 8-400",
        _ => return None,
    };
    Some(name)
}

fn lookup_key(code: &str) -> String {
    code.trim().to_uppercase()
}

pub fn resolve_airport_name(code: &str) -> String {
    builtin_airport(&lookup_key(code))
        .map(str::to_string)
        .unwrap_or_else(|| code.to_string())
}

pub fn resolve_airline_name(code: &str) -> String {
    builtin_airline(&lookup_key(code))
        .map(str::to_string)
        .unwrap_or_else(|| code.to_string())
}

pub fn resolve_aircraft_name(code: &str) -> String {
    builtin_aircraft(&lookup_key(code))
        .map(str::to_string)
        .unwrap_or_else(|| aircraft_fallback(code))
}

fn aircraft_fallback(code: &str) -> String {
    format!("aircraft {}", code)
}

// Name tables layered over the built-in ones. Keys are upper-cased on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub airports: HashMap<String, String>,
    pub airlines: HashMap<String, String>,
    pub aircraft: HashMap<String, String>,
}

impl Catalog {
    // Built-in tables only
    pub fn builtin() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, NormalizeError> {
        let raw: Catalog = serde_json::from_str(json)?;
        Ok(Self {
            airports: upper_keys(raw.airports),
            airlines: upper_keys(raw.airlines),
            aircraft: upper_keys(raw.aircraft),
        })
    }

    pub fn airport_name(&self, code: &str) -> String {
        let key = lookup_key(code);
        self.airports
            .get(&key)
            .cloned()
            .or_else(|| builtin_airport(&key).map(str::to_string))
            .unwrap_or_else(|| code.to_string())
    }

    pub fn airline_name(&self, code: &str) -> String {
        let key = lookup_key(code);
        self.airlines
            .get(&key)
            .cloned()
            .or_else(|| builtin_airline(&key).map(str::to_string))
            .unwrap_or_else(|| code.to_string())
    }

    pub fn aircraft_name(&self, code: &str) -> String {
        let key = lookup_key(code);
        self.aircraft
            .get(&key)
            .cloned()
            .or_else(|| builtin_aircraft(&key).map(str::to_string))
            .unwrap_or_else(|| aircraft_fallback(code))
    }
}

fn upper_keys(table: HashMap<String, String>) -> HashMap<String, String> {
    table
        .into_iter()
        .map(|(code, name)| (lookup_key(&code), name))
        .collect()
}
