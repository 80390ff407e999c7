use crate::error::Error;

/// URL-safe byte/text codecs shared by the token generations.
///
/// Base-32 keeps the earliest wire format: the RFC 4648 alphabet (`A-Z2-7`)
/// padded with `0` instead of the standard `=`, which keeps tokens usable in
/// URLs without escaping. Base-62 is the newer, denser alternative: plain
/// alphanumerics, no padding, roughly 1.37x expansion instead of 1.6x.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlSafeEncoding {
    Base32,
    Base62,
}

impl UrlSafeEncoding {
    pub fn encode(&self, bytes: &[u8]) -> String {
        match self {
            UrlSafeEncoding::Base32 => base32_encode(bytes),
            UrlSafeEncoding::Base62 => base62_encode(bytes),
        }
    }

    pub fn decode(&self, encoded: &str) -> Result<Vec<u8>, Error> {
        match self {
            UrlSafeEncoding::Base32 => base32_decode(encoded),
            UrlSafeEncoding::Base62 => base62_decode(encoded),
        }
    }
}

const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";
const BASE32_PAD: char = '0';

fn base32_encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().div_ceil(5) * 8);
    for chunk in bytes.chunks(5) {
        let mut group = [0u8; 5];
        group[..chunk.len()].copy_from_slice(chunk);
        let value = group
            .iter()
            .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte));
        let characters = (chunk.len() * 8 + 4) / 5;
        for slot in 0..8 {
            if slot < characters {
                let index = (value >> (35 - 5 * slot)) & 31;
                out.push(BASE32_ALPHABET[index as usize] as char);
            } else {
                out.push(BASE32_PAD);
            }
        }
    }
    out
}

fn base32_decode(encoded: &str) -> Result<Vec<u8>, Error> {
    let data = encoded.trim_end_matches(BASE32_PAD);
    let mut out = Vec::with_capacity(data.len() * 5 / 8 + 1);
    let mut accumulator = 0u32;
    let mut bits = 0u32;
    for byte in data.bytes() {
        let value = match byte {
            b'A'..=b'Z' => byte - b'A',
            b'2'..=b'7' => byte - b'2' + 26,
            _ => return Err(Error::BadId(encoded.to_string())),
        };
        accumulator = (accumulator << 5) | u32::from(value);
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push((accumulator >> bits) as u8);
        }
    }
    Ok(out)
}

const BASE62_ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

fn base62_encode(bytes: &[u8]) -> String {
    convert_base(bytes, 256, 62)
        .into_iter()
        .map(|digit| BASE62_ALPHABET[digit as usize] as char)
        .collect()
}

fn base62_decode(encoded: &str) -> Result<Vec<u8>, Error> {
    let mut digits = Vec::with_capacity(encoded.len());
    for byte in encoded.bytes() {
        digits.push(match byte {
            b'0'..=b'9' => byte - b'0',
            b'A'..=b'Z' => byte - b'A' + 10,
            b'a'..=b'z' => byte - b'a' + 36,
            _ => return Err(Error::BadId(encoded.to_string())),
        });
    }
    Ok(convert_base(&digits, 62, 256))
}

/// Radix conversion by repeated division over the whole digit sequence.
/// Leading zero digits are preserved, so `[0x00, 0x00, 0x01]` encodes to
/// `001` and decodes back to the same three bytes.
fn convert_base(message: &[u8], source_base: u32, target_base: u32) -> Vec<u8> {
    let mut out = Vec::new();
    let mut source = message.to_vec();
    while !source.is_empty() {
        let mut quotient = Vec::with_capacity(source.len());
        let mut remainder = 0u32;
        for &digit in &source {
            let accumulator = u32::from(digit) + remainder * source_base;
            let quotient_digit = accumulator / target_base;
            remainder = accumulator % target_base;
            if !quotient.is_empty() || quotient_digit > 0 {
                quotient.push(quotient_digit as u8);
            }
        }
        out.push(remainder as u8);
        source = quotient;
    }
    let leading_zeroes = message
        .iter()
        .take(message.len().saturating_sub(1))
        .take_while(|&&digit| digit == 0)
        .count();
    out.extend(std::iter::repeat(0).take(leading_zeroes));
    out.reverse();
    out
}
