//! Allocation-free rendering of instants and durations into record buffers.
//!
//! Dates are decomposed from an absolute day count using the proleptic
//! Gregorian calendar; digits are taken from a two-digit lookup table.
//! Years are assumed to fit in four digits.

use std::time::Duration;

/// `"00" "01" ... "99"` packed back to back.
const DIGITS2: &[u8; 200] = b"\
0001020304050607080910111213141516171819\
2021222324252627282930313233343536373839\
4041424344454647484950515253545556575859\
6061626364656667686970717273747576777879\
8081828384858687888990919293949596979899";

/// Width of `"YYYY-MM-DDTHH:MM:SS.mmmZ"` including both quotes.
pub const QUOTED_TIME_LEN: usize = 26;

const SECONDS_PER_DAY: i64 = 86_400;

/// Normalizes a `(seconds, nanoseconds)` pair so that `0 <= nanos < 1e9`.
///
/// `jiff` reports negative sub-second parts for instants before the epoch.
pub fn normalize(secs: i64, nanos: i32) -> (i64, u32) {
    if nanos < 0 {
        (secs - 1, (nanos + 1_000_000_000).unsigned_abs())
    } else {
        (secs, nanos.unsigned_abs())
    }
}

/// Splits days since 1970-01-01 into `(year, month, day)`.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

#[inline]
fn put2(out: &mut [u8], at: usize, value: u32) {
    let i = (value as usize % 100) * 2;
    out[at] = DIGITS2[i];
    out[at + 1] = DIGITS2[i + 1];
}

/// Appends `"YYYY-MM-DDTHH:MM:SS.mmmZ"` for the given UTC instant.
///
/// The fractional second is truncated to milliseconds.
pub fn append_rfc3339_millis(buf: &mut Vec<u8>, secs: i64, nanos: u32) {
    let days = secs.div_euclid(SECONDS_PER_DAY);
    let sod = secs.rem_euclid(SECONDS_PER_DAY) as u32;
    let (year, month, day) = civil_from_days(days);
    let year = year.rem_euclid(10_000) as u32;
    let millis = nanos / 1_000_000;

    let mut out: [u8; QUOTED_TIME_LEN] = *b"\"0000-00-00T00:00:00.000Z\"";
    put2(&mut out, 1, year / 100);
    put2(&mut out, 3, year % 100);
    put2(&mut out, 6, month);
    put2(&mut out, 9, day);
    put2(&mut out, 12, sod / 3600);
    put2(&mut out, 15, sod / 60 % 60);
    put2(&mut out, 18, sod % 60);
    out[21] = b'0' + (millis / 100) as u8;
    put2(&mut out, 22, millis % 100);
    buf.extend_from_slice(&out);
}

/// Appends the millisecond Unix epoch as a bare JSON integer.
///
/// Digits are produced backward from the least significant position, two
/// at a time, so no leading zeros are written for any instant.
pub fn append_epoch_millis(buf: &mut Vec<u8>, secs: i64, nanos: u32) {
    let millis = i128::from(secs) * 1000 + i128::from(nanos / 1_000_000);
    let mut digits = [0u8; 40];
    let mut w = digits.len();
    let mut v = millis.unsigned_abs();
    while v >= 100 {
        let i = (v % 100) as usize * 2;
        v /= 100;
        w -= 2;
        digits[w] = DIGITS2[i];
        digits[w + 1] = DIGITS2[i + 1];
    }
    if v >= 10 {
        let i = v as usize * 2;
        w -= 2;
        digits[w] = DIGITS2[i];
        digits[w + 1] = DIGITS2[i + 1];
    } else {
        w -= 1;
        digits[w] = b'0' + v as u8;
    }
    if millis < 0 {
        w -= 1;
        digits[w] = b'-';
    }
    buf.extend_from_slice(&digits[w..]);
}

/// Writes `v` right-aligned ending at `w`, returning the new start.
fn fmt_int(out: &mut [u8], mut w: usize, mut v: u128) -> usize {
    if v == 0 {
        w -= 1;
        out[w] = b'0';
    } else {
        while v > 0 {
            w -= 1;
            out[w] = b'0' + (v % 10) as u8;
            v /= 10;
        }
    }
    w
}

/// Writes the low `prec` decimal digits of `v` as a fraction, dropping
/// trailing zeros (and the dot when every digit is zero).
fn fmt_frac(out: &mut [u8], mut w: usize, mut v: u128, prec: usize) -> (usize, u128) {
    let mut print = false;
    for _ in 0..prec {
        let digit = (v % 10) as u8;
        print = print || digit != 0;
        if print {
            w -= 1;
            out[w] = b'0' + digit;
        }
        v /= 10;
    }
    if print {
        w -= 1;
        out[w] = b'.';
    }
    (w, v)
}

/// Appends a human duration such as `1h2m3.5s`, `1.5ms`, `250µs` or `0s`.
///
/// Sub-second values use the largest unit that keeps the integer part
/// non-zero; longer values are split into hours, minutes and seconds.
pub fn append_duration(buf: &mut Vec<u8>, d: Duration) {
    let mut out = [0u8; 48];
    let mut w = out.len();
    let mut u = d.as_nanos();

    if u < 1_000_000_000 {
        if u == 0 {
            buf.extend_from_slice(b"0s");
            return;
        }
        w -= 1;
        out[w] = b's';
        let prec = if u < 1_000 {
            w -= 1;
            out[w] = b'n';
            0
        } else if u < 1_000_000 {
            w -= 2;
            out[w..w + 2].copy_from_slice("µ".as_bytes());
            3
        } else {
            w -= 1;
            out[w] = b'm';
            6
        };
        (w, u) = fmt_frac(&mut out, w, u, prec);
        w = fmt_int(&mut out, w, u);
    } else {
        w -= 1;
        out[w] = b's';
        (w, u) = fmt_frac(&mut out, w, u, 9);
        w = fmt_int(&mut out, w, u % 60);
        u /= 60;
        if u > 0 {
            w -= 1;
            out[w] = b'm';
            w = fmt_int(&mut out, w, u % 60);
            u /= 60;
            if u > 0 {
                w -= 1;
                out[w] = b'h';
                w = fmt_int(&mut out, w, u);
            }
        }
    }
    buf.extend_from_slice(&out[w..]);
}
