//! External identifier codec.
//!
//! Products travel over the wire as `prod_NNN`, suppliers as `SUP-NNN`.
//! Both encodings zero-pad to three digits and keep growing past that.
//! Decoding also accepts a bare integer string for older clients.

use crate::error::ApiError;

pub fn encode_product_id(id: i32) -> String {
    format!("prod_{:03}", id)
}

pub fn decode_product_id(raw: &str) -> Result<i32, ApiError> {
    let digits = raw.strip_prefix("prod_").unwrap_or(raw);
    digits
        .parse()
        .map_err(|_| ApiError::InvalidId(raw.to_string()))
}

pub fn encode_supplier_id(id: i32) -> String {
    format!("SUP-{:03}", id)
}

pub fn decode_supplier_id(raw: &str) -> Result<i32, ApiError> {
    let digits = raw
        .strip_prefix("SUP-")
        .or_else(|| raw.strip_prefix("sup-"))
        .unwrap_or(raw);
    digits
        .parse()
        .map_err(|_| ApiError::InvalidId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_is_zero_padded() {
        assert_eq!(encode_product_id(7), "prod_007");
        assert_eq!(encode_product_id(42), "prod_042");
        assert_eq!(encode_product_id(1000), "prod_1000");
    }

    #[test]
    fn product_id_round_trips() {
        for id in [1, 7, 99, 100, 1000, 123456] {
            assert_eq!(decode_product_id(&encode_product_id(id)).unwrap(), id);
        }
    }

    #[test]
    fn decode_accepts_bare_integers() {
        assert_eq!(decode_product_id("15").unwrap(), 15);
        assert_eq!(decode_supplier_id("15").unwrap(), 15);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode_product_id("prod_").is_err());
        assert!(decode_product_id("medicine_7").is_err());
        assert!(decode_product_id("").is_err());
        assert!(decode_supplier_id("SUP-abc").is_err());
    }

    #[test]
    fn supplier_scheme_is_independent() {
        assert_eq!(encode_supplier_id(7), "SUP-007");
        assert_eq!(decode_supplier_id("SUP-007").unwrap(), 7);
        assert_eq!(decode_supplier_id("sup-007").unwrap(), 7);
        // A product id does not decode as a supplier id.
        assert!(decode_supplier_id("prod_007").is_err());
    }
}
