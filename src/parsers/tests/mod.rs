mod parts_tests;
