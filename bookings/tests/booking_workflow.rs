//! End-to-end booking scenarios against a real database.

mod common;

use bookings::codec::{decode, Marshal};
use bookings::operations::BookingService;
use bookings::{
    CodeGenerator, CreateRoomRestrictionParams, Error, ErrorKind, RequestContext, Reservation,
    RestrictionKind,
};
use common::{add_room, create_test_database, date, form, BookingForm};

#[test]
fn test_search_book_and_look_up() {
    let (db, _dir) = create_test_database();
    let ctx = RequestContext::default();
    let garden = add_room(&db, "Garden Suite");
    let harbour = add_room(&db, "Harbour View");
    let service = BookingService::new(&db, CodeGenerator::default());

    let search = form(&[("start_date", "2024-05-08"), ("end_date", "2024-05-10")]);
    let free = service.search(&ctx, &search).unwrap();
    assert_eq!(
        free.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![garden.id, harbour.id]
    );

    let booking = service
        .book(&ctx, &BookingForm::new(garden.id, "2024-05-08", "2024-05-10").build())
        .unwrap();
    let reservation = &booking.reservation;
    assert_eq!(reservation.code.len(), 10);
    assert_eq!(booking.fields["code"], reservation.code);
    assert_eq!(booking.fields["start_date"], "2024-05-08");

    // The marshalled form decodes back to the same record.
    let decoded: Reservation = decode(&booking.fields).unwrap();
    assert_eq!(&decoded, reservation);

    let free = service.search(&ctx, &search).unwrap();
    assert_eq!(free.iter().map(|r| r.id).collect::<Vec<_>>(), vec![harbour.id]);

    let found = db
        .get_reservation_by_last_name(&ctx, &reservation.code.to_lowercase(), "LOVELACE")
        .unwrap()
        .unwrap();
    assert_eq!(found.id, reservation.id);

    let blocks = db.list_room_restrictions(&ctx, garden.id).unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].reservation_id, Some(reservation.id));
    assert_eq!(blocks[0].restriction_id, RestrictionKind::Reservation.id());
}

#[test]
fn test_abutting_stays_share_a_changeover_day() {
    let (db, _dir) = create_test_database();
    let ctx = RequestContext::default();
    let room = add_room(&db, "Garden Suite");
    let service = BookingService::new(&db, CodeGenerator::default());

    service
        .book(&ctx, &BookingForm::new(room.id, "2024-05-01", "2024-05-08").build())
        .unwrap();
    service
        .book(
            &ctx,
            &BookingForm::new(room.id, "2024-05-08", "2024-05-10")
                .with_guest("Grace", "Hopper")
                .build(),
        )
        .unwrap();
    service
        .book(
            &ctx,
            &BookingForm::new(room.id, "2024-04-28", "2024-05-01")
                .with_guest("Alan", "Turing")
                .build(),
        )
        .unwrap();

    let err = service
        .book(&ctx, &BookingForm::new(room.id, "2024-05-07", "2024-05-09").build())
        .unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[test]
fn test_owner_block_prevents_booking() {
    let (db, _dir) = create_test_database();
    let ctx = RequestContext::default();
    let room = add_room(&db, "Garden Suite");
    db.create_room_restriction(
        &ctx,
        &CreateRoomRestrictionParams {
            start_date: date("2024-05-01"),
            end_date: date("2024-05-08"),
            room_id: room.id,
            reservation_id: None,
            restriction_id: RestrictionKind::OwnerBlock.id(),
        },
    )
    .unwrap();

    let service = BookingService::new(&db, CodeGenerator::default());
    let check = form(&[
        ("room_id", &room.id.to_string()),
        ("start_date", "2024-05-05"),
        ("end_date", "2024-05-10"),
    ]);
    assert!(!service.check(&ctx, &check).unwrap());

    match service.book(&ctx, &BookingForm::new(room.id, "2024-05-05", "2024-05-10").build()) {
        Err(Error::AvailabilityConflict { room_id, start, end }) => {
            assert_eq!(room_id, room.id);
            assert_eq!(start, date("2024-05-05"));
            assert_eq!(end, date("2024-05-10"));
        }
        other => panic!("expected conflict, got {other:?}"),
    }
    assert!(db
        .list_reservations(&ctx, &bookings::ListReservationsParams { limit: 10, offset: 0 })
        .unwrap()
        .is_empty());
}

#[test]
fn test_cancel_releases_dates() {
    let (db, _dir) = create_test_database();
    let ctx = RequestContext::default();
    let room = add_room(&db, "Garden Suite");
    let service = BookingService::new(&db, CodeGenerator::default());
    let fields = BookingForm::new(room.id, "2024-05-01", "2024-05-08").build();

    let first = service.book(&ctx, &fields).unwrap();
    assert!(db.delete_reservation(&ctx, first.reservation.id).unwrap());
    assert!(db.list_room_restrictions(&ctx, room.id).unwrap().is_empty());

    let second = service.book(&ctx, &fields).unwrap();
    assert_ne!(second.reservation.id, first.reservation.id);
}

#[test]
fn test_invalid_input_never_reaches_store() {
    let (db, _dir) = create_test_database();
    let ctx = RequestContext::default();
    let room = add_room(&db, "Garden Suite");
    let service = BookingService::new(&db, CodeGenerator::default());

    let backwards = BookingForm::new(room.id, "2024-05-10", "2024-05-08").build();
    assert!(matches!(
        service.book(&ctx, &backwards),
        Err(Error::InvalidDateRange { .. })
    ));

    let same_day = BookingForm::new(room.id, "2024-05-08", "2024-05-08").build();
    assert!(matches!(
        service.book(&ctx, &same_day),
        Err(Error::InvalidDateRange { .. })
    ));

    let mut garbled = BookingForm::new(room.id, "2024-05-01", "2024-05-08").build();
    garbled.insert("room_id".into(), "garden".into());
    match service.book(&ctx, &garbled) {
        Err(Error::Encoding { field, value, .. }) => {
            assert_eq!(field, "room_id");
            assert_eq!(value, "garden");
        }
        other => panic!("expected encoding error, got {other:?}"),
    }

    let negative = form(&[
        ("start_date", "2024-05-01"),
        ("end_date", "2024-05-08"),
        ("limit", "-1"),
    ]);
    assert_eq!(
        service.search(&ctx, &negative).unwrap_err().kind(),
        ErrorKind::Encoding
    );

    assert!(db.list_room_restrictions(&ctx, room.id).unwrap().is_empty());
}

#[test]
fn test_missing_guest_fields_roll_back() {
    let (db, _dir) = create_test_database();
    let ctx = RequestContext::default();
    let room = add_room(&db, "Garden Suite");
    let service = BookingService::new(&db, CodeGenerator::default());

    let mut fields = BookingForm::new(room.id, "2024-05-01", "2024-05-08").build();
    fields.remove("email");

    let err = service.book(&ctx, &fields).unwrap_err();
    assert!(matches!(err, Error::ConstraintViolation { .. }));
    assert!(!err.is_retryable());
    assert!(db.list_room_restrictions(&ctx, room.id).unwrap().is_empty());
}

#[test]
fn test_search_paging_and_page_size() {
    let (db, _dir) = create_test_database();
    let ctx = RequestContext::default();
    for name in ["A", "B", "C", "D"] {
        add_room(&db, name);
    }
    let service = BookingService::new(&db, CodeGenerator::default()).with_page_size(3);

    let range = [("start_date", "2024-05-01"), ("end_date", "2024-05-08")];
    assert_eq!(service.search(&ctx, &form(&range)).unwrap().len(), 3);

    let mut page = range.to_vec();
    page.extend([("limit", "2"), ("offset", "3")]);
    let rooms = service.search(&ctx, &form(&page)).unwrap();
    assert_eq!(rooms.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(), vec!["D"]);

    let mut none = range.to_vec();
    none.push(("limit", "0"));
    assert!(service.search(&ctx, &form(&none)).unwrap().is_empty());
}

#[test]
fn test_reservation_marshal_omits_absent_optionals() {
    let (db, _dir) = create_test_database();
    let ctx = RequestContext::default();
    let room = add_room(&db, "Garden Suite");
    let service = BookingService::new(&db, CodeGenerator::default());

    let booking = service
        .book(&ctx, &BookingForm::new(room.id, "2024-05-01", "2024-05-08").build())
        .unwrap();
    let fields = booking.reservation.marshal();
    assert!(!fields.contains_key("phone"));
    assert!(!fields.contains_key("notes"));
    assert_eq!(fields["room_id"], room.id.to_string());
}
