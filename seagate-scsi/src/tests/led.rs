use super::*;

#[test]
fn channel_wire_bytes() {
    assert_eq!(LedChannel::from_wire(0xFF), LedChannel::Absent);
    assert_eq!(LedChannel::from_wire(1), LedChannel::Off);
    assert_eq!(LedChannel::from_wire(2), LedChannel::On);
    assert_eq!(LedChannel::from_wire(0), LedChannel::Unknown(0));
    assert_eq!(LedChannel::Unknown(7).to_wire(), 7);
    for b in 0..=255u8 {
        assert_eq!(LedChannel::from_wire(b).to_wire(), b);
    }
}

#[test]
fn encode_on() {
    assert_eq!(encode_led(true, true, true), [2, 2, 0, 0]);
    assert_eq!(encode_led(true, true, false), [2, 0xFF, 0, 0]);
    assert_eq!(encode_led(true, false, true), [2, 2, 0, 0]);
    assert_eq!(encode_led(true, false, false), [2, 0xFF, 0, 0]);
}

#[test]
fn encode_off() {
    assert_eq!(encode_led(false, true, true), [1, 1, 0, 0]);
    assert_eq!(encode_led(false, true, false), [1, 0xFF, 0, 0]);
    assert_eq!(encode_led(false, false, true), [0xFF, 1, 0, 0]);
    assert_eq!(encode_led(false, false, false), [0xFF, 0xFF, 0, 0]);
}

#[test]
fn decode_absent_wherever_encoded_absent() {
    for led_on in [false, true] {
        for ch0 in [false, true] {
            for ch1 in [false, true] {
                let wire = encode_led(led_on, ch0, ch1);
                let (_, p0, p1) = decode_led(wire);
                assert_eq!(p0, wire[0] != 0xFF);
                assert_eq!(p1, wire[1] != 0xFF);
            }
        }
    }
}

#[test]
fn decode_round_trip_when_present() {
    for led_on in [false, true] {
        assert_eq!(
            decode_led(encode_led(led_on, true, true)),
            (Some(led_on), true, true)
        );
        assert_eq!(
            decode_led(encode_led(led_on, true, false)),
            (Some(led_on), true, false)
        );
    }
    assert_eq!(
        decode_led(encode_led(false, false, true)),
        (Some(false), false, true)
    );
}

#[test]
fn decode_on_wins() {
    assert_eq!(decode_led([0x01, 0x02, 0, 0]).0, Some(true));
    assert_eq!(decode_led([0x02, 0x01, 0, 0]).0, Some(true));
}

#[test]
fn decode_undefined() {
    assert_eq!(decode_led([0xFF, 0xFF, 0, 0]), (None, false, false));
    assert_eq!(decode_led([0x00, 0x07, 0, 0]), (None, true, true));
}

#[test]
fn decode_passes_unknown_through() {
    let state = LedState::decode([0x05, 0x01, 0, 0]);
    assert_eq!(state.channel0, LedChannel::Unknown(5));
    assert_eq!(state.is_on(), Some(false));
    assert!(state.channel0_present());
}

#[test]
fn switched_keeps_presence() {
    let state = LedState::decode([0xFF, 0x02, 0, 0]);
    assert_eq!(state.switched(false).encode(), [0xFF, 0x01, 0, 0]);
    assert_eq!(state.switched(true).encode(), [0x02, 0x02, 0, 0]);
}

#[test]
fn percent_boundaries() {
    assert_eq!(percent_to_flags(0), Ok(1));
    assert_eq!(percent_to_flags(25), Ok(1));
    assert_eq!(percent_to_flags(26), Ok(3));
    assert_eq!(percent_to_flags(50), Ok(3));
    assert_eq!(percent_to_flags(51), Ok(7));
    assert_eq!(percent_to_flags(85), Ok(7));
    assert_eq!(percent_to_flags(86), Ok(15));
    assert_eq!(percent_to_flags(100), Ok(15));
    assert_eq!(percent_to_flags(101), Err(PayloadError::OutOfRange));
    assert_eq!(percent_to_flags(u32::MAX), Err(PayloadError::OutOfRange));
}

#[test]
fn capacity_from_percent() {
    assert_eq!(CapacityLeds::from_percent(90), Ok(CapacityLeds(15)));
    assert_eq!(CapacityLeds::from_percent(200), Err(PayloadError::OutOfRange));
}

#[test]
fn capacity_display_bits_reversed() {
    assert_eq!(CapacityLeds::from_display_bits("1000"), Some(CapacityLeds(1)));
    assert_eq!(CapacityLeds::from_display_bits("1100"), Some(CapacityLeds(3)));
    assert_eq!(CapacityLeds::from_display_bits("0001"), Some(CapacityLeds(8)));
    assert_eq!(CapacityLeds::from_display_bits("1111"), Some(CapacityLeds(15)));
    assert_eq!(CapacityLeds::from_display_bits("0000"), Some(CapacityLeds(0)));
}

#[test]
fn capacity_display_bits_invalid() {
    assert_eq!(CapacityLeds::from_display_bits("102"), None);
    assert_eq!(CapacityLeds::from_display_bits("10201"), None);
    assert_eq!(CapacityLeds::from_display_bits("10a1"), None);
}

#[test]
fn capacity_display() {
    assert_eq!(std::format!("{}", CapacityLeds(1)), "1000");
    assert_eq!(std::format!("{}", CapacityLeds(7)), "1110");
    assert_eq!(std::format!("{}", CapacityLeds(0xF8)), "0001");
    for n in 0..16u8 {
        let s = std::format!("{}", CapacityLeds(n));
        assert_eq!(CapacityLeds::from_display_bits(&s), Some(CapacityLeds(n)));
    }
}

#[test]
fn capacity_payloads() {
    assert_eq!(CapacityLeds(7).encode(), [4, 7, 0, 0]);
    assert_eq!(CapacityLeds::decode([0, 3, 0, 0]), CapacityLeds(3));
}
