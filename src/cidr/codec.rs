//! Dotted-decimal IPv4 codec.
//!
//! The numeric form is big-endian: the first octet occupies the most
//! significant byte, matching MySQL's `INET_ATON` and the layout of the
//! `minip`/`maxip` columns in the reference dataset.

use crate::error_handling::CidrError;

/// Parses a dotted-decimal IPv4 address into its `u32` representation.
///
/// Exactly four dot-separated decimal octets are required, each in
/// `[0, 255]`. Anything else -- wrong octet count, non-numeric text, an
/// out-of-range octet -- fails with [`CidrError::InvalidAddress`] before any
/// bits are shifted, so a value like `"1.2.3.999"` can never wrap silently
/// into a different address.
///
/// # Examples
///
/// ```
/// use georoute::ip_to_number;
///
/// assert_eq!(ip_to_number("192.168.1.1").unwrap(), 3232235777);
/// assert!(ip_to_number("1.2.3.999").is_err());
/// ```
pub fn ip_to_number(ip: &str) -> Result<u32, CidrError> {
    let invalid = || CidrError::InvalidAddress(ip.to_string());

    let mut octets = [0u32; 4];
    let mut count = 0;
    for part in ip.split('.') {
        if count == 4 {
            return Err(invalid());
        }
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let value: u32 = part.parse().map_err(|_| invalid())?;
        if value > 255 {
            return Err(invalid());
        }
        octets[count] = value;
        count += 1;
    }
    if count != 4 {
        return Err(invalid());
    }

    Ok((octets[0] << 24) | (octets[1] << 16) | (octets[2] << 8) | octets[3])
}

/// Formats a `u32` as canonical dotted-decimal, the inverse of
/// [`ip_to_number`]. Always succeeds and never emits leading zeros.
pub fn number_to_ip(num: u32) -> String {
    format!(
        "{}.{}.{}.{}",
        (num >> 24) & 0xFF,
        (num >> 16) & 0xFF,
        (num >> 8) & 0xFF,
        num & 0xFF
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(ip_to_number("0.0.0.0").unwrap(), 0);
        assert_eq!(ip_to_number("255.255.255.255").unwrap(), u32::MAX);
        assert_eq!(ip_to_number("192.168.1.1").unwrap(), 3232235777);
        assert_eq!(ip_to_number("1.0.0.0").unwrap(), 16777216);
    }

    #[test]
    fn test_round_trip() {
        for ip in ["0.0.0.0", "1.2.3.4", "10.0.0.1", "172.16.254.3", "255.255.255.255"] {
            assert_eq!(number_to_ip(ip_to_number(ip).unwrap()), ip);
        }
    }

    #[test]
    fn test_decode_is_canonical() {
        assert_eq!(number_to_ip(0), "0.0.0.0");
        assert_eq!(number_to_ip(u32::MAX), "255.255.255.255");
        assert_eq!(number_to_ip(16777217), "1.0.0.1");
    }

    #[test]
    fn test_rejects_wrong_octet_count() {
        assert!(ip_to_number("1.2.3").is_err());
        assert!(ip_to_number("1.2.3.4.5").is_err());
        assert!(ip_to_number("").is_err());
        assert!(ip_to_number("1.2.3.").is_err());
        assert!(ip_to_number(".1.2.3.4").is_err());
    }

    #[test]
    fn test_rejects_non_numeric() {
        assert!(ip_to_number("a.b.c.d").is_err());
        assert!(ip_to_number("1.2.3.x").is_err());
        assert!(ip_to_number("1.2.3.-1").is_err());
        assert!(ip_to_number("1.2.3.+4").is_err());
        assert!(ip_to_number("1.2.3. 4").is_err());
    }

    #[test]
    fn test_rejects_out_of_range_octet() {
        assert!(ip_to_number("1.2.3.256").is_err());
        assert!(ip_to_number("1.2.3.999").is_err());
        assert!(ip_to_number("300.0.0.1").is_err());
    }

    #[test]
    fn test_error_carries_input() {
        let err = ip_to_number("1.2.3.999").unwrap_err();
        assert_eq!(err, CidrError::InvalidAddress("1.2.3.999".to_string()));
    }
}
