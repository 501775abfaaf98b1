//! Human-readable won amounts with 억/만 unit breaks.

const EOK: f64 = 100_000_000.0;
const MAN: f64 = 10_000.0;

/// Format a monetary magnitude for display: `₩3.2억`, `₩4500만`, `₩980`.
pub fn format_amount(value: f64) -> String {
	if value >= EOK {
		format!("₩{:.1}억", value / EOK)
	} else if value >= MAN {
		format!("₩{:.0}만", value / MAN)
	} else {
		format!("₩{value:.0}")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn breaks_at_hundred_million() {
		assert_eq!(format_amount(320_000_000.0), "₩3.2억");
		assert_eq!(format_amount(100_000_000.0), "₩1.0억");
	}

	#[test]
	fn breaks_at_ten_thousand() {
		assert_eq!(format_amount(45_000_000.0), "₩4500만");
		assert_eq!(format_amount(10_000.0), "₩1만");
		assert_eq!(format_amount(99_999_999.0), "₩10000만");
	}

	#[test]
	fn small_amounts_render_plain() {
		assert_eq!(format_amount(9_999.0), "₩9999");
		assert_eq!(format_amount(0.0), "₩0");
	}
}
