//! Property-based tests for the record codec round-trip law.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

use super::*;
use crate::codec::{decode, non_blank, Marshal};

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default())
}

// Nanosecond precision survives the round trip; no truncation expected.
fn timestamp_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..4_000_000_000, 0u32..1_000_000_000)
        .prop_map(|(secs, nanos)| Utc.timestamp_opt(secs, nanos).single().unwrap_or_default())
}

// Includes `Some("")`, which decodes as absent.
fn optional_text_strategy() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[A-Za-z0-9 +.-]{0,20}")
}

fn canonical(value: &Option<String>) -> Option<String> {
    non_blank(value.as_deref()).map(str::to_owned)
}

fn text_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 @.'-]{0,24}"
}

fn reservation_strategy() -> impl Strategy<Value = Reservation> {
    (
        (1i64..1_000_000, "[1-9A-Z]{6,14}", text_strategy(), text_strategy()),
        (text_strategy(), optional_text_strategy(), date_strategy(), date_strategy()),
        (1i64..1000, optional_text_strategy(), timestamp_strategy(), timestamp_strategy()),
    )
        .prop_map(
            |(
                (id, code, first_name, last_name),
                (email, phone, start_date, end_date),
                (room_id, notes, created_at, updated_at),
            )| Reservation {
                id,
                code,
                first_name,
                last_name,
                email,
                phone,
                start_date,
                end_date,
                room_id,
                notes,
                created_at,
                updated_at,
            },
        )
}

fn room_strategy() -> impl Strategy<Value = Room> {
    (
        1i64..1000,
        text_strategy(),
        text_strategy(),
        optional_text_strategy(),
        timestamp_strategy(),
        timestamp_strategy(),
    )
        .prop_map(
            |(id, name, description, image_filename, created_at, updated_at)| Room {
                id,
                name,
                description,
                image_filename,
                created_at,
                updated_at,
            },
        )
}

fn room_restriction_strategy() -> impl Strategy<Value = RoomRestriction> {
    (
        (1i64..1000, date_strategy(), date_strategy(), 1i64..1000),
        (
            prop::option::of(1i64..1000),
            1i64..3,
            timestamp_strategy(),
            timestamp_strategy(),
        ),
    )
        .prop_map(
            |(
                (id, start_date, end_date, room_id),
                (reservation_id, restriction_id, created_at, updated_at),
            )| RoomRestriction {
                id,
                start_date,
                end_date,
                room_id,
                reservation_id,
                restriction_id,
                created_at,
                updated_at,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        .. ProptestConfig::default()
    })]

    #[test]
    fn reservation_round_trip(reservation in reservation_strategy()) {
        let expected = Reservation {
            phone: canonical(&reservation.phone),
            notes: canonical(&reservation.notes),
            ..reservation.clone()
        };
        let decoded: Reservation = decode(&reservation.marshal()).unwrap();
        prop_assert_eq!(&decoded, &expected);
        prop_assert_eq!(decode::<Reservation>(&decoded.marshal()).unwrap(), decoded);
    }

    #[test]
    fn room_round_trip(room in room_strategy()) {
        let expected = Room {
            image_filename: canonical(&room.image_filename),
            ..room.clone()
        };
        let decoded: Room = decode(&room.marshal()).unwrap();
        prop_assert_eq!(decoded, expected);
    }

    #[test]
    fn room_restriction_round_trip(block in room_restriction_strategy()) {
        let decoded: RoomRestriction = decode(&block.marshal()).unwrap();
        prop_assert_eq!(decoded, block);
    }

    #[test]
    fn restriction_round_trip(
        id in 1i64..100,
        name in text_strategy(),
        created_at in timestamp_strategy(),
        updated_at in timestamp_strategy(),
    ) {
        let restriction = Restriction { id, name, created_at, updated_at };
        let decoded: Restriction = decode(&restriction.marshal()).unwrap();
        prop_assert_eq!(decoded, restriction);
    }

    #[test]
    fn user_round_trip(
        id in 1i64..100,
        first_name in text_strategy(),
        last_name in text_strategy(),
        email in text_strategy(),
        access_level in 0i64..4,
        created_at in timestamp_strategy(),
        updated_at in timestamp_strategy(),
    ) {
        let user = User {
            id,
            first_name,
            last_name,
            email,
            access_level,
            created_at,
            updated_at,
            ..User::default()
        };
        let decoded: User = decode(&user.marshal()).unwrap();
        prop_assert_eq!(decoded, user);
    }

    #[test]
    fn availability_params_round_trip(
        room_id in 1i64..1000,
        start_date in date_strategy(),
        end_date in date_strategy(),
        limit in 0u32..1000,
        offset in 0u32..1000,
    ) {
        let check = CheckRoomAvailabilityParams { room_id, start_date, end_date };
        prop_assert_eq!(decode::<CheckRoomAvailabilityParams>(&check.marshal()).unwrap(), check);

        let list = ListAvailableRoomsParams { start_date, end_date, limit, offset };
        prop_assert_eq!(decode::<ListAvailableRoomsParams>(&list.marshal()).unwrap(), list);

        let rooms = ListRoomsParams { limit, offset };
        prop_assert_eq!(decode::<ListRoomsParams>(&rooms.marshal()).unwrap(), rooms);
    }

    #[test]
    fn create_reservation_params_round_trip(reservation in reservation_strategy()) {
        let params = CreateReservationParams {
            code: reservation.code,
            first_name: reservation.first_name,
            last_name: reservation.last_name,
            email: reservation.email,
            phone: reservation.phone,
            start_date: reservation.start_date,
            end_date: reservation.end_date,
            room_id: reservation.room_id,
            notes: reservation.notes,
        };
        let expected = CreateReservationParams {
            phone: canonical(&params.phone),
            notes: canonical(&params.notes),
            ..params.clone()
        };
        let decoded: CreateReservationParams = decode(&params.marshal()).unwrap();
        prop_assert_eq!(decoded, expected);
    }

    #[test]
    fn update_reservation_params_round_trip(
        id in 1i64..1_000_000,
        first_name in text_strategy(),
        last_name in text_strategy(),
        email in text_strategy(),
        phone in optional_text_strategy(),
        notes in optional_text_strategy(),
    ) {
        let params = UpdateReservationParams { id, first_name, last_name, email, phone, notes };
        let expected = UpdateReservationParams {
            phone: canonical(&params.phone),
            notes: canonical(&params.notes),
            ..params.clone()
        };
        prop_assert_eq!(decode::<UpdateReservationParams>(&params.marshal()).unwrap(), expected);
    }

    #[test]
    fn create_room_params_round_trip(
        name in text_strategy(),
        description in text_strategy(),
        image_filename in optional_text_strategy(),
    ) {
        let params = CreateRoomParams { name, description, image_filename };
        let expected = CreateRoomParams {
            image_filename: canonical(&params.image_filename),
            ..params.clone()
        };
        prop_assert_eq!(decode::<CreateRoomParams>(&params.marshal()).unwrap(), expected);
    }

    #[test]
    fn update_room_params_round_trip(
        id in 1i64..1000,
        name in text_strategy(),
        description in text_strategy(),
        image_filename in optional_text_strategy(),
    ) {
        let params = UpdateRoomParams { id, name, description, image_filename };
        let expected = UpdateRoomParams {
            image_filename: canonical(&params.image_filename),
            ..params.clone()
        };
        prop_assert_eq!(decode::<UpdateRoomParams>(&params.marshal()).unwrap(), expected);
    }

    #[test]
    fn create_room_restriction_params_round_trip(
        start_date in date_strategy(),
        end_date in date_strategy(),
        room_id in 1i64..1000,
        reservation_id in prop::option::of(1i64..1000),
        restriction_id in 1i64..3,
    ) {
        let params = CreateRoomRestrictionParams {
            start_date,
            end_date,
            room_id,
            reservation_id,
            restriction_id,
        };
        prop_assert_eq!(
            decode::<CreateRoomRestrictionParams>(&params.marshal()).unwrap(),
            params
        );
    }

    #[test]
    fn list_reservations_params_round_trip(limit in 0u32..10_000, offset in 0u32..10_000) {
        let params = ListReservationsParams { limit, offset };
        prop_assert_eq!(decode::<ListReservationsParams>(&params.marshal()).unwrap(), params);
    }

    #[test]
    fn create_user_params_round_trip(
        first_name in text_strategy(),
        last_name in text_strategy(),
        email in text_strategy(),
        password in "[ -~]{0,32}",
        access_level in 0i64..4,
    ) {
        let params = CreateUserParams { first_name, last_name, email, password, access_level };
        prop_assert_eq!(decode::<CreateUserParams>(&params.marshal()).unwrap(), params);
    }

    #[test]
    fn authenticate_user_params_round_trip(email in text_strategy(), password in "[ -~]{0,32}") {
        let params = AuthenticateUserParams { email, password };
        prop_assert_eq!(decode::<AuthenticateUserParams>(&params.marshal()).unwrap(), params);
    }

    #[test]
    fn garbage_ids_never_decode(value in "[a-z]{1,8}") {
        let mut fields = crate::codec::FieldMap::new();
        fields.insert("room_id".into(), value);
        prop_assert!(decode::<CheckRoomAvailabilityParams>(&fields).is_err());
    }
}
