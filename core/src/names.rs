//! Deterministic name, address and label generation from curated lists.
//!
//! Replaces ad-hoc faker calls: every draw goes through a StreamRng, so
//! the same seed always yields the same names.

use crate::rng::StreamRng;

pub struct NamePool;

impl NamePool {
    pub fn full_name(rng: &mut StreamRng) -> String {
        format!("{} {}", Self::first_name(rng), Self::last_name(rng))
    }

    pub fn first_name(rng: &mut StreamRng) -> &'static str {
        *rng.pick(FIRST_NAMES)
    }

    pub fn last_name(rng: &mut StreamRng) -> &'static str {
        *rng.pick(LAST_NAMES)
    }

    pub fn email(rng: &mut StreamRng, full_name: &str) -> String {
        let slug: String = full_name
            .to_ascii_lowercase()
            .chars()
            .map(|c| if c == ' ' { '.' } else { c })
            .collect();
        format!(
            "{slug}{}@{}",
            rng.next_u64_below(10_000),
            rng.pick(EMAIL_DOMAINS)
        )
    }

    pub fn phone(rng: &mut StreamRng) -> String {
        format!(
            "({:03}) {:03}-{:04}",
            rng.range_u64(200, 989),
            rng.range_u64(200, 999),
            rng.next_u64_below(10_000)
        )
    }

    pub fn street_address(rng: &mut StreamRng) -> String {
        format!(
            "{} {} {}",
            rng.range_u64(1, 9999),
            rng.pick(STREET_NAMES),
            rng.pick(STREET_SUFFIXES)
        )
    }

    pub fn city(rng: &mut StreamRng) -> &'static str {
        *rng.pick(CITIES)
    }

    pub fn state(rng: &mut StreamRng) -> &'static str {
        *rng.pick(STATES)
    }

    pub fn zip_code(rng: &mut StreamRng) -> String {
        format!("{:05}", rng.next_u64_below(100_000))
    }

    pub fn location(rng: &mut StreamRng) -> String {
        format!("{}, {}", Self::city(rng), Self::state(rng))
    }

    pub fn company_name(rng: &mut StreamRng) -> String {
        if rng.chance(0.5) {
            format!(
                "{} {} {}",
                rng.pick(COMPANY_PREFIXES),
                rng.pick(COMPANY_INDUSTRIES),
                rng.pick(COMPANY_SUFFIXES)
            )
        } else {
            format!(
                "{} {} {}",
                Self::last_name(rng),
                rng.pick(COMPANY_INDUSTRIES),
                rng.pick(COMPANY_SUFFIXES)
            )
        }
    }

    pub fn product_name(rng: &mut StreamRng) -> String {
        format!(
            "{} {} {}",
            rng.pick(PRODUCT_ADJECTIVES),
            rng.pick(PRODUCT_MATERIALS),
            rng.pick(PRODUCT_NOUNS)
        )
    }

    /// Generic storefront names used by fraudulent merchants.
    pub fn shell_merchant_name(rng: &mut StreamRng) -> String {
        format!(
            "{} #{}",
            rng.pick(SHELL_MERCHANT_NAMES),
            rng.range_u64(100, 999)
        )
    }

    /// Addresses shared across synthetic-identity clusters.
    pub fn shared_fraud_address(rng: &mut StreamRng) -> &'static str {
        *rng.pick(SHARED_FRAUD_ADDRESSES)
    }

    /// Fingerprints shared across compromised devices.
    pub fn shared_fingerprint(rng: &mut StreamRng) -> &'static str {
        *rng.pick(SHARED_FINGERPRINTS)
    }

    /// Cluster prefixes for suspicious IP addresses.
    pub fn suspicious_ip(rng: &mut StreamRng) -> String {
        format!("{}.{}", rng.pick(SUSPICIOUS_IP_PREFIXES), rng.range_u64(1, 254))
    }

    pub fn ipv4(rng: &mut StreamRng) -> String {
        format!(
            "{}.{}.{}.{}",
            rng.range_u64(1, 223),
            rng.next_u64_below(256),
            rng.next_u64_below(256),
            rng.range_u64(1, 254)
        )
    }
}

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Christopher", "Karen", "Charles", "Lisa", "Daniel", "Nancy", "Matthew", "Betty", "Anthony",
    "Sandra", "Mark", "Margaret", "Donald", "Ashley", "Steven", "Kimberly", "Andrew", "Emily",
    "Paul", "Donna", "Joshua", "Michelle", "Kenneth", "Carol", "Kevin", "Amanda", "Brian",
    "Melissa", "George", "Deborah", "Timothy", "Stephanie", "Ronald", "Rebecca", "Jason",
    "Sharon", "Edward", "Laura", "Jeffrey", "Cynthia", "Ryan", "Dorothy", "Jacob", "Amy",
    "Gary", "Kathleen", "Nicholas", "Angela", "Eric", "Shirley", "Jonathan", "Brenda", "Stephen",
    "Emma", "Larry", "Anna", "Justin", "Pamela", "Scott", "Nicole", "Brandon", "Samantha",
    "Benjamin", "Katherine", "Samuel", "Christine", "Gregory", "Helen", "Alexander", "Debra",
    "Patrick", "Rachel", "Frank", "Carolyn", "Raymond", "Janet", "Jack", "Maria", "Dennis",
    "Olivia", "Jerry", "Heather",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson", "Walker", "Young", "Allen", "King", "Wright",
    "Scott", "Torres", "Nguyen", "Hill", "Flores", "Green", "Adams", "Nelson", "Baker", "Hall",
    "Rivera", "Campbell", "Mitchell", "Carter", "Roberts", "Gomez", "Phillips", "Evans",
    "Turner", "Diaz", "Parker", "Cruz", "Edwards", "Collins", "Reyes", "Stewart", "Morris",
    "Morales", "Murphy", "Cook", "Rogers", "Gutierrez", "Ortiz", "Morgan", "Cooper", "Peterson",
    "Bailey", "Reed", "Kelly", "Howard", "Ramos", "Kim", "Cox", "Ward", "Richardson", "Watson",
    "Brooks", "Chavez", "Wood", "Bennett", "Gray", "Mendoza", "Ruiz", "Hughes", "Price",
    "Alvarez", "Castillo", "Sanders", "Patel", "Myers", "Long", "Ross", "Foster", "Jimenez",
    "Chen",
];

const EMAIL_DOMAINS: &[&str] = &[
    "example.com",
    "example.net",
    "example.org",
    "mail.example.com",
    "inbox.example.net",
];

const STREET_NAMES: &[&str] = &[
    "Oak", "Maple", "Cedar", "Pine", "Elm", "Washington", "Lake", "Hill", "Park", "Main",
    "Walnut", "Chestnut", "Spruce", "Birch", "Sunset", "Ridge", "Meadow", "River", "Spring",
    "Highland", "Forest", "Willow", "Jefferson", "Lincoln", "Madison", "Franklin", "Jackson",
    "Clinton", "Union", "Church",
];

const STREET_SUFFIXES: &[&str] = &[
    "St", "Ave", "Blvd", "Dr", "Ln", "Rd", "Ct", "Way", "Pl", "Ter",
];

const CITIES: &[&str] = &[
    "Springfield", "Franklin", "Clinton", "Fairview", "Madison", "Georgetown", "Arlington",
    "Salem", "Bristol", "Dover", "Hudson", "Kingston", "Milton", "Newport", "Oxford",
    "Riverside", "Ashland", "Burlington", "Clayton", "Dayton", "Florence", "Greenville",
    "Jackson", "Lebanon", "Manchester", "Milford", "Monroe", "Oakland", "Troy", "Winchester",
];

const STATES: &[&str] = &[
    "AL", "AZ", "CA", "CO", "CT", "FL", "GA", "IL", "IN", "IA", "KS", "KY", "LA", "MA", "MD",
    "MI", "MN", "MO", "NC", "NJ", "NM", "NV", "NY", "OH", "OR", "PA", "TN", "TX", "VA", "WA",
];

const COMPANY_PREFIXES: &[&str] = &[
    "Summit", "Pioneer", "Golden", "Pacific", "Atlantic", "Northern", "Premier", "Capital",
    "Liberty", "Unity", "Vanguard", "Heritage", "Crescent", "Sterling", "Beacon", "Harbor",
];

const COMPANY_INDUSTRIES: &[&str] = &[
    "Foods", "Logistics", "Hardware", "Apparel", "Electronics", "Outfitters", "Provisions",
    "Trading", "Supply", "Goods", "Markets", "Imports",
];

const COMPANY_SUFFIXES: &[&str] = &[
    "LLC", "Inc", "Co", "Corp", "Group", "Partners", "Holdings",
];

const PRODUCT_ADJECTIVES: &[&str] = &[
    "Classic", "Modern", "Compact", "Deluxe", "Essential", "Premium", "Portable", "Smart",
    "Rustic", "Sleek", "Ergonomic", "Vintage", "Durable", "Lightweight", "Foldable", "Wireless",
];

const PRODUCT_MATERIALS: &[&str] = &[
    "Steel", "Oak", "Cotton", "Leather", "Bamboo", "Ceramic", "Canvas", "Aluminum", "Glass",
    "Walnut", "Wool", "Carbon",
];

const PRODUCT_NOUNS: &[&str] = &[
    "Chair", "Lamp", "Backpack", "Bottle", "Speaker", "Keyboard", "Desk", "Jacket", "Blender",
    "Watch", "Notebook", "Headphones", "Mug", "Tent", "Scale", "Router", "Planter", "Knife",
    "Charger", "Tripod",
];

const SHELL_MERCHANT_NAMES: &[&str] = &[
    "Quick Shop LLC",
    "Fast Mart Inc",
    "Easy Buy Corp",
    "Simple Store",
    "Basic Retail",
    "Generic Shop",
];

const SHARED_FRAUD_ADDRESSES: &[&str] = &[
    "123 Fake Street",
    "456 Scam Avenue",
    "789 Fraud Lane",
    "111 Suspicious Way",
    "222 Identity Drive",
];

const SHARED_FINGERPRINTS: &[&str] = &[
    "fp_malware_001",
    "fp_bot_network",
    "fp_fraud_tool",
    "fp_takeover_001",
    "fp_automated_002",
];

const SUSPICIOUS_IP_PREFIXES: &[&str] = &[
    "192.168.1",
    "10.0.0",
    "172.16.1",
    "203.0.113",
    "198.51.100",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, StreamSlot};

    #[test]
    fn names_are_deterministic() {
        let mut a = RngBank::new(9).for_stream(StreamSlot::Customer);
        let mut b = RngBank::new(9).for_stream(StreamSlot::Customer);
        for _ in 0..100 {
            assert_eq!(NamePool::full_name(&mut a), NamePool::full_name(&mut b));
        }
    }

    #[test]
    fn email_is_derived_from_the_name() {
        let mut rng = RngBank::new(5).for_stream(StreamSlot::Customer);
        let email = NamePool::email(&mut rng, "Jane Doe");
        assert!(email.starts_with("jane.doe"));
        assert!(email.contains('@'));
    }
}
