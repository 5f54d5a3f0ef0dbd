use crate::appresult::AppError;
use crate::models::{
    Booking, BookingStatus, Message, MessageCreate, Property, PropertyType, User, UserCreate,
    UserRole, UserUpdate,
};
use crate::store::PropertyFilter;
use crate::testing::{
    booking_payload, make_booking, make_property, make_user, property_payload, setup,
};

// ---- users ----

#[tokio::test]
async fn email_uniqueness_ignores_case() {
    let app = setup().await;
    make_user(&app.state, "Ana@Example.com", UserRole::Guest).await;

    let dup = User::new(
        UserCreate {
            email: "ana@EXAMPLE.com".to_owned(),
            password: "pw".to_owned(),
            first_name: "Ana".to_owned(),
            last_name: "Again".to_owned(),
            phone: None,
            user_type: UserRole::Guest,
            profile_image: None,
        },
        "not-a-real-hash".to_owned(),
    );
    assert!(matches!(
        app.state.users.insert(&dup).await,
        Err(AppError::Conflict(_))
    ));

    let found = app
        .state
        .users
        .find_by_email("ANA@example.COM")
        .await
        .unwrap();
    assert!(found.is_some());
}

#[tokio::test]
async fn profile_update_touches_only_supplied_fields() {
    let app = setup().await;
    let user = make_user(&app.state, "ana@example.com", UserRole::Guest).await;

    let updated = app
        .state
        .users
        .update_profile(
            &user.id,
            &UserUpdate {
                first_name: None,
                last_name: None,
                phone: Some("+351 111 222".to_owned()),
                profile_image: None,
            },
        )
        .await
        .unwrap()
        .expect("user exists");

    assert_eq!(updated.first_name, user.first_name);
    assert_eq!(updated.last_name, user.last_name);
    assert_eq!(updated.phone.as_deref(), Some("+351 111 222"));
    assert!(updated.updated_at >= user.updated_at);

    let missing = app
        .state
        .users
        .update_profile(
            "no-such-id",
            &UserUpdate {
                first_name: None,
                last_name: None,
                phone: None,
                profile_image: None,
            },
        )
        .await
        .unwrap();
    assert!(missing.is_none());
}

// ---- properties ----

#[tokio::test]
async fn search_filters_and_counts() {
    let app = setup().await;
    let host = make_user(&app.state, "host@example.com", UserRole::Host).await;

    let porto = property_payload(); // Porto apartment, 90/night
    let mut villa = property_payload();
    villa.title = "Hillside villa".to_owned();
    villa.property_type = PropertyType::Villa;
    villa.price_per_night = 250.0;
    villa.location = serde_json::json!({ "city": "Lisbon", "country": "Portugal" });
    let mut room = property_payload();
    room.title = "Spare room".to_owned();
    room.property_type = PropertyType::Room;
    room.price_per_night = 40.0;
    room.location = serde_json::json!({ "city": "Lisbon", "country": "Portugal" });

    for payload in [porto, villa, room] {
        let property = Property::new(&host.id, payload).unwrap();
        app.state.properties.insert(&property).await.unwrap();
    }
    let mut hidden = Property::new(&host.id, property_payload()).unwrap();
    hidden.is_active = false;
    app.state.properties.insert(&hidden).await.unwrap();

    let all = PropertyFilter {
        limit: 10,
        ..Default::default()
    };
    let (found, total) = app.state.properties.search(&all).await.unwrap();
    assert_eq!((found.len(), total), (3, 3)); // inactive listing is invisible

    // city match is a substring, any case
    let lisbon = PropertyFilter {
        limit: 10,
        city: Some("lisbon".to_owned()),
        ..Default::default()
    };
    let (_, total) = app.state.properties.search(&lisbon).await.unwrap();
    assert_eq!(total, 2);

    let pricey = PropertyFilter {
        limit: 10,
        min_price: Some(100.0),
        ..Default::default()
    };
    let (found, total) = app.state.properties.search(&pricey).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(found[0].title, "Hillside villa");

    let cheap = PropertyFilter {
        limit: 10,
        property_type: Some("room".to_owned()),
        max_price: Some(50.0),
        ..Default::default()
    };
    let (found, _) = app.state.properties.search(&cheap).await.unwrap();
    assert_eq!(found[0].title, "Spare room");

    // total counts every match, not just the returned page
    let page = PropertyFilter {
        limit: 1,
        city: Some("Lisbon".to_owned()),
        ..Default::default()
    };
    let (found, total) = app.state.properties.search(&page).await.unwrap();
    assert_eq!((found.len(), total), (1, 2));
}

// ---- bookings ----

#[tokio::test]
async fn overlapping_booking_is_rejected() {
    let app = setup().await;
    let host = make_user(&app.state, "host@example.com", UserRole::Host).await;
    let guest = make_user(&app.state, "guest@example.com", UserRole::Guest).await;
    let other = make_user(&app.state, "other@example.com", UserRole::Guest).await;
    let property = make_property(&app.state, &host.id).await;

    make_booking(&app.state, &property, &guest.id, "2025-07-10", "2025-07-14").await;

    let clash = Booking::new(
        &property,
        &other.id,
        booking_payload(&property.id, "2025-07-12", "2025-07-16"),
    )
    .unwrap();
    let inserted = app.state.bookings.create_if_available(&clash).await.unwrap();
    assert!(!inserted);
    assert!(app
        .state
        .bookings
        .find_by_id(&clash.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn racing_overlapping_bookings_admit_exactly_one() {
    let app = setup().await;
    let host = make_user(&app.state, "host@example.com", UserRole::Host).await;
    let ana = make_user(&app.state, "ana@example.com", UserRole::Guest).await;
    let bea = make_user(&app.state, "bea@example.com", UserRole::Guest).await;
    let property = make_property(&app.state, &host.id).await;

    let first = Booking::new(
        &property,
        &ana.id,
        booking_payload(&property.id, "2025-07-10", "2025-07-14"),
    )
    .unwrap();
    let second = Booking::new(
        &property,
        &bea.id,
        booking_payload(&property.id, "2025-07-12", "2025-07-16"),
    )
    .unwrap();

    let (a, b) = tokio::join!(
        app.state.bookings.create_if_available(&first),
        app.state.bookings.create_if_available(&second),
    );
    assert!(a.unwrap() ^ b.unwrap(), "exactly one racing booking may land");

    let survivors = app
        .state
        .bookings
        .active_for_property(&property.id)
        .await
        .unwrap();
    assert_eq!(survivors.len(), 1);
}

#[tokio::test]
async fn back_to_back_bookings_are_allowed() {
    let app = setup().await;
    let host = make_user(&app.state, "host@example.com", UserRole::Host).await;
    let guest = make_user(&app.state, "guest@example.com", UserRole::Guest).await;
    let property = make_property(&app.state, &host.id).await;

    // checkout day equals the next check-in day
    make_booking(&app.state, &property, &guest.id, "2025-07-10", "2025-07-13").await;
    make_booking(&app.state, &property, &guest.id, "2025-07-13", "2025-07-16").await;
}

#[tokio::test]
async fn cancelled_booking_frees_its_dates() {
    let app = setup().await;
    let host = make_user(&app.state, "host@example.com", UserRole::Host).await;
    let guest = make_user(&app.state, "guest@example.com", UserRole::Guest).await;
    let property = make_property(&app.state, &host.id).await;

    let first = make_booking(&app.state, &property, &guest.id, "2025-07-10", "2025-07-14").await;

    let retry = Booking::new(
        &property,
        &guest.id,
        booking_payload(&property.id, "2025-07-10", "2025-07-14"),
    )
    .unwrap();
    assert!(!app.state.bookings.create_if_available(&retry).await.unwrap());

    app.state
        .bookings
        .set_status(&first.id, BookingStatus::Cancelled)
        .await
        .unwrap();

    let retry = Booking::new(
        &property,
        &guest.id,
        booking_payload(&property.id, "2025-07-10", "2025-07-14"),
    )
    .unwrap();
    assert!(app.state.bookings.create_if_available(&retry).await.unwrap());
}

#[tokio::test]
async fn host_sees_bookings_across_their_properties() {
    let app = setup().await;
    let host = make_user(&app.state, "host@example.com", UserRole::Host).await;
    let rival = make_user(&app.state, "rival@example.com", UserRole::Host).await;
    let guest = make_user(&app.state, "guest@example.com", UserRole::Guest).await;
    let first = make_property(&app.state, &host.id).await;
    let second = make_property(&app.state, &host.id).await;

    make_booking(&app.state, &first, &guest.id, "2025-07-01", "2025-07-04").await;
    make_booking(&app.state, &second, &guest.id, "2025-07-10", "2025-07-12").await;

    assert_eq!(app.state.bookings.list_for_host(&host.id).await.unwrap().len(), 2);
    assert_eq!(app.state.bookings.list_for_guest(&guest.id).await.unwrap().len(), 2);
    assert!(app.state.bookings.list_for_host(&rival.id).await.unwrap().is_empty());
}

// ---- conversations ----

#[tokio::test]
async fn conversation_identity_ignores_argument_order() {
    let app = setup().await;
    let a = make_user(&app.state, "a@example.com", UserRole::Guest).await;
    let b = make_user(&app.state, "b@example.com", UserRole::Host).await;

    let (first, created) = app
        .state
        .conversations
        .get_or_create(&a.id, &b.id, None)
        .await
        .unwrap();
    assert!(created);

    let (second, created) = app
        .state
        .conversations
        .get_or_create(&b.id, &a.id, None)
        .await
        .unwrap();
    assert!(!created);
    assert_eq!(first.id, second.id);
}

#[tokio::test]
async fn racing_conversation_creates_converge() {
    let app = setup().await;
    let a = make_user(&app.state, "a@example.com", UserRole::Guest).await;
    let b = make_user(&app.state, "b@example.com", UserRole::Host).await;

    let (left, right) = tokio::join!(
        app.state.conversations.get_or_create(&a.id, &b.id, None),
        app.state.conversations.get_or_create(&b.id, &a.id, None),
    );
    let (left, left_created) = left.unwrap();
    let (right, right_created) = right.unwrap();

    assert_eq!(left.id, right.id);
    assert!(left_created ^ right_created, "only one call may create");
}

#[tokio::test]
async fn property_context_gets_its_own_conversation() {
    let app = setup().await;
    let a = make_user(&app.state, "a@example.com", UserRole::Guest).await;
    let b = make_user(&app.state, "b@example.com", UserRole::Host).await;
    let property = make_property(&app.state, &b.id).await;

    let (plain, _) = app
        .state
        .conversations
        .get_or_create(&a.id, &b.id, None)
        .await
        .unwrap();
    let (scoped, created) = app
        .state
        .conversations
        .get_or_create(&a.id, &b.id, Some(&property.id))
        .await
        .unwrap();
    assert!(created);
    assert_ne!(plain.id, scoped.id);

    let (again, created) = app
        .state
        .conversations
        .get_or_create(&b.id, &a.id, Some(&property.id))
        .await
        .unwrap();
    assert!(!created);
    assert_eq!(scoped.id, again.id);
}

#[tokio::test]
async fn blank_property_context_is_no_context() {
    let app = setup().await;
    let a = make_user(&app.state, "a@example.com", UserRole::Guest).await;
    let b = make_user(&app.state, "b@example.com", UserRole::Host).await;

    let (plain, _) = app
        .state
        .conversations
        .get_or_create(&a.id, &b.id, None)
        .await
        .unwrap();

    // Some("") names the same thread as None
    let (blank, created) = app
        .state
        .conversations
        .get_or_create(&a.id, &b.id, Some(""))
        .await
        .unwrap();
    assert!(!created);
    assert_eq!(blank.id, plain.id);
    assert_eq!(blank.property_id, None);
}

#[tokio::test]
async fn append_message_bumps_conversation_updated_at() {
    let app = setup().await;
    let a = make_user(&app.state, "a@example.com", UserRole::Guest).await;
    let b = make_user(&app.state, "b@example.com", UserRole::Host).await;
    let (conversation, _) = app
        .state
        .conversations
        .get_or_create(&a.id, &b.id, None)
        .await
        .unwrap();

    let msg = Message::new(
        &a.id,
        MessageCreate {
            conversation_id: conversation.id.clone(),
            content: "hello".to_owned(),
            message_type: "text".to_owned(),
        },
    );
    app.state.conversations.append_message(&msg).await.unwrap();

    let after = app
        .state
        .conversations
        .find_by_id(&conversation.id)
        .await
        .unwrap()
        .expect("conversation exists");
    assert_eq!(after.updated_at, msg.created_at);
    assert!(after.updated_at > conversation.updated_at);
}

#[tokio::test]
async fn message_history_is_chronological() {
    let app = setup().await;
    let a = make_user(&app.state, "a@example.com", UserRole::Guest).await;
    let b = make_user(&app.state, "b@example.com", UserRole::Host).await;
    let (conversation, _) = app
        .state
        .conversations
        .get_or_create(&a.id, &b.id, None)
        .await
        .unwrap();

    for (sender, content) in [(&a, "one"), (&b, "two"), (&a, "three")] {
        let msg = Message::new(
            &sender.id,
            MessageCreate {
                conversation_id: conversation.id.clone(),
                content: content.to_owned(),
                message_type: "text".to_owned(),
            },
        );
        app.state.conversations.append_message(&msg).await.unwrap();
    }

    let history = app
        .state
        .conversations
        .messages_for(&conversation.id)
        .await
        .unwrap();
    let contents: Vec<_> = history.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, ["one", "two", "three"]);

    let last = app
        .state
        .conversations
        .last_message(&conversation.id)
        .await
        .unwrap()
        .expect("messages exist");
    assert_eq!(last.content, "three");
}

#[tokio::test]
async fn mark_read_is_idempotent() {
    let app = setup().await;
    let a = make_user(&app.state, "a@example.com", UserRole::Guest).await;
    let b = make_user(&app.state, "b@example.com", UserRole::Host).await;
    let (conversation, _) = app
        .state
        .conversations
        .get_or_create(&a.id, &b.id, None)
        .await
        .unwrap();

    let msg = Message::new(
        &a.id,
        MessageCreate {
            conversation_id: conversation.id.clone(),
            content: "ping".to_owned(),
            message_type: "text".to_owned(),
        },
    );
    app.state.conversations.append_message(&msg).await.unwrap();
    assert!(!msg.is_read);

    for _ in 0..2 {
        app.state.conversations.mark_read(&msg.id).await.unwrap();
        let read = app
            .state
            .conversations
            .find_message(&msg.id)
            .await
            .unwrap()
            .expect("message exists");
        assert!(read.is_read);
    }
}
